use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{FileEntry, FileId};
use crate::error::{Result, SiftError};
use crate::filter::AdFilter;
use crate::selection::{SelectionSet, SelectionSource};
use crate::stats::PlanStats;

/// Selections below this share of the clean files are sent as an include list;
/// at or above it, as an exclude list. Fixed, not a per-call knob.
/// Stored as `(numerator, denominator)` so the comparison stays exact.
pub const EXCLUDE_RATIO_THRESHOLD: (usize, usize) = (1, 2);

/// How "these files" is expressed to the transfer API. Ids keep listing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransferPlan {
    /// Save the whole folder, minus `excluded` (the ad ids).
    All { excluded: Vec<FileId> },
    /// Save exactly `ids`; `tokens[i]` belongs to `ids[i]`.
    IncludeList {
        ids: Vec<FileId>,
        tokens: Vec<Option<String>>,
    },
    /// Save the whole folder except `ids`.
    ExcludeList { ids: Vec<FileId> },
}

impl TransferPlan {
    pub fn mode(&self) -> &'static str {
        match self {
            TransferPlan::All { .. } => "all",
            TransferPlan::IncludeList { .. } => "include_list",
            TransferPlan::ExcludeList { .. } => "exclude_list",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub plan: TransferPlan,
    pub to_transfer: Vec<FileEntry>,
    pub ads: Vec<FileEntry>,
    pub stats: PlanStats,
}

#[derive(Clone, Debug, Default)]
pub struct TransferPlanner {
    filter: AdFilter,
}

impl TransferPlanner {
    pub fn new(filter: AdFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &AdFilter {
        &self.filter
    }

    pub fn plan(&self, listing: &[FileEntry], selection: &SelectionSet) -> Result<PlanOutcome> {
        plan_transfer(listing, selection, &self.filter)
    }

    pub fn plan_with(
        &self,
        listing: &[FileEntry],
        source: &dyn SelectionSource,
    ) -> Result<PlanOutcome> {
        let selection = source.selection(listing)?;
        self.plan(listing, &selection)
    }
}

/// Reconciles `selection` with the ad filter and picks the request shape.
///
/// An empty selection means every clean file. Ads never reach `to_transfer`
/// even when selected. Fails with `EmptySelectionResult` when nothing clean
/// is left.
pub fn plan_transfer(
    listing: &[FileEntry],
    selection: &SelectionSet,
    filter: &AdFilter,
) -> Result<PlanOutcome> {
    let listing = dedup_by_id(listing);
    let part = filter.partition(&listing);

    let to_transfer: Vec<FileEntry> = if selection.is_empty() {
        part.clean.clone()
    } else {
        part.clean
            .iter()
            .filter(|f| selection.contains(&f.id))
            .cloned()
            .collect()
    };

    let stats = PlanStats {
        total: listing.len() as u64,
        ads: part.ad.len() as u64,
        clean: part.clean.len() as u64,
        selected: selection.len() as u64,
        to_transfer: to_transfer.len() as u64,
    };

    if to_transfer.is_empty() {
        warn!(
            total = stats.total,
            ads = stats.ads,
            selected = stats.selected,
            "nothing left to transfer"
        );
        return Err(SiftError::EmptySelectionResult);
    }

    let plan = if to_transfer.len() == part.clean.len() {
        TransferPlan::All {
            excluded: part.ad.iter().map(|f| f.id.clone()).collect(),
        }
    } else if below_exclude_threshold(to_transfer.len(), part.clean.len()) {
        TransferPlan::IncludeList {
            ids: to_transfer.iter().map(|f| f.id.clone()).collect(),
            tokens: to_transfer.iter().map(|f| f.token.clone()).collect(),
        }
    } else {
        let keep: HashSet<&FileId> = to_transfer.iter().map(|f| &f.id).collect();
        TransferPlan::ExcludeList {
            ids: part
                .clean
                .iter()
                .filter(|f| !keep.contains(&f.id))
                .map(|f| f.id.clone())
                .collect(),
        }
    };

    info!(
        mode = plan.mode(),
        total = stats.total,
        ads = stats.ads,
        to_transfer = stats.to_transfer,
        ratio = stats.ratio(),
        "transfer planned"
    );

    Ok(PlanOutcome {
        plan,
        to_transfer,
        ads: part.ad,
        stats,
    })
}

/// `selected / clean < EXCLUDE_RATIO_THRESHOLD`, cross-multiplied.
fn below_exclude_threshold(selected: usize, clean: usize) -> bool {
    let (num, den) = EXCLUDE_RATIO_THRESHOLD;
    selected * den < clean * num
}

/// First occurrence of each id wins.
fn dedup_by_id(listing: &[FileEntry]) -> Vec<FileEntry> {
    let mut seen = HashSet::with_capacity(listing.len());
    listing
        .iter()
        .filter(|f| seen.insert(f.id.clone()))
        .cloned()
        .collect()
}

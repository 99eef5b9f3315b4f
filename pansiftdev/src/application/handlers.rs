use std::path::{Path, PathBuf};

use pansift_core::error::Result;
use pansift_core::{
    AdFilter, Classification, FileEntry, FilterPolicy, IndexSelection, PlanOutcome, SelectionSet,
    SelectionSource, TransferPlanner,
};

use tracing::info;

use super::listing::{Provider, load_listing};
use super::wire;

fn policy_from_args(rules: Option<PathBuf>, strict: bool) -> Result<FilterPolicy> {
    match rules {
        Some(path) => FilterPolicy::from_path(&path),
        None if strict => Ok(FilterPolicy::strict()),
        None => Ok(FilterPolicy::default()),
    }
}

fn selection_from_args(
    listing: &[FileEntry],
    select: Option<String>,
    ids: Vec<String>,
) -> Result<SelectionSet> {
    match select {
        Some(expr) => IndexSelection::parse(&expr)?.selection(listing),
        None => Ok(ids.into_iter().collect()),
    }
}

pub fn handle_rules(strict: bool) -> Result<()> {
    let policy = if strict {
        FilterPolicy::strict()
    } else {
        FilterPolicy::default()
    };
    println!("{}", policy.to_json_pretty()?);
    Ok(())
}

pub fn handle_classify(
    listing: PathBuf,
    provider: Provider,
    rules: Option<PathBuf>,
    strict: bool,
    ads_only: bool,
) -> Result<()> {
    let filter = AdFilter::new(policy_from_args(rules, strict)?);
    let files = load_listing(&listing, provider)?;
    for (i, f) in files.iter().enumerate() {
        if let Some(line) = classify_line(&filter, i + 1, f, ads_only) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One `classify` output row; `None` when `ads_only` hides a clean file.
fn classify_line(filter: &AdFilter, pos: usize, f: &FileEntry, ads_only: bool) -> Option<String> {
    let (label, rule) = match filter.classify(f) {
        Classification::Ad => ("AD", filter.matched_rule(&f.name, f.size_bytes)),
        Classification::Clean if ads_only => return None,
        Classification::Clean => ("clean", None),
    };
    Some(format!(
        "{:>4}  {:<6} {:<12} {}  {} bytes",
        pos,
        label,
        rule.unwrap_or("-"),
        f.name,
        f.size_bytes
    ))
}

pub fn build_plan(
    listing: &Path,
    provider: Provider,
    rules: Option<PathBuf>,
    strict: bool,
    select: Option<String>,
    ids: Vec<String>,
) -> Result<PlanOutcome> {
    let planner = TransferPlanner::new(AdFilter::new(policy_from_args(rules, strict)?));
    let files = load_listing(listing, provider)?;
    info!(listing = %listing.display(), files = files.len(), "listing loaded");
    let selection = selection_from_args(&files, select, ids)?;
    planner.plan(&files, &selection)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    listing: PathBuf,
    provider: Provider,
    rules: Option<PathBuf>,
    strict: bool,
    select: Option<String>,
    ids: Vec<String>,
    wire: bool,
    dest: String,
) -> Result<()> {
    let outcome = build_plan(&listing, provider, rules, strict, select, ids)?;
    let out = if wire {
        wire::render(provider, &outcome, &dest)?
    } else {
        let filtered: Vec<&str> = outcome.ads.iter().map(|f| f.name.as_str()).collect();
        serde_json::json!({
            "plan": outcome.plan,
            "stats": outcome.stats,
            "filtered": filtered,
        })
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

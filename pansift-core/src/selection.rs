use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::domain::{FileEntry, FileId};
use crate::error::{Result, SiftError};

/// Ids the user marked for transfer. Empty means "nothing explicit".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<FileId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<FileId>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileId> {
        self.ids.iter()
    }
}

impl<I: Into<FileId>> FromIterator<I> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Capability the host environment injects to report what the user checked.
pub trait SelectionSource: Send + Sync {
    fn selection(&self, listing: &[FileEntry]) -> Result<SelectionSet>;
}

impl SelectionSource for SelectionSet {
    fn selection(&self, _listing: &[FileEntry]) -> Result<SelectionSet> {
        Ok(self.clone())
    }
}

/// 1-based positions into the listing, e.g. `"1,3,5-10"` or `"all"`.
/// Ranges stay unexpanded until resolved against a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexSelection {
    All,
    Ranges(Vec<RangeInclusive<usize>>),
}

impl IndexSelection {
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if matches!(expr.to_lowercase().as_str(), "all" | "a" | "全部") {
            return Ok(IndexSelection::All);
        }
        let mut out = Vec::new();
        for part in expr.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.split_once('-') {
                Some((lo, hi)) => {
                    let lo = parse_index(lo)?;
                    let hi = parse_index(hi)?;
                    if lo > hi {
                        return Err(SiftError::Selection(format!("descending range {part:?}")));
                    }
                    out.push(lo..=hi);
                }
                None => {
                    let i = parse_index(part)?;
                    out.push(i..=i);
                }
            }
        }
        Ok(IndexSelection::Ranges(out))
    }
}

fn parse_index(s: &str) -> Result<usize> {
    s.trim()
        .parse::<usize>()
        .map_err(|e| SiftError::Selection(format!("bad index {s:?}: {e}")))
}

impl SelectionSource for IndexSelection {
    fn selection(&self, listing: &[FileEntry]) -> Result<SelectionSet> {
        let set: SelectionSet = match self {
            IndexSelection::All => listing.iter().map(|f| f.id.clone()).collect(),
            IndexSelection::Ranges(ranges) => ranges
                .iter()
                .flat_map(|r| {
                    let lo = (*r.start()).max(1);
                    let hi = (*r.end()).min(listing.len());
                    lo..=hi
                })
                .map(|i| listing[i - 1].id.clone())
                .collect(),
        };
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(n: usize) -> Vec<FileEntry> {
        (1..=n)
            .map(|i| FileEntry::new(format!("f{i}"), format!("E{i:02}.mkv"), 1 << 30))
            .collect()
    }

    #[test]
    fn parses_lists_and_ranges() {
        let sel = IndexSelection::parse(" 1, 3 ,5-7").unwrap();
        assert_eq!(sel, IndexSelection::Ranges(vec![1..=1, 3..=3, 5..=7]));
        let ids: Vec<_> = sel.selection(&listing(8)).unwrap().iter().cloned().collect();
        let want: Vec<FileId> = ["f1", "f3", "f5", "f6", "f7"]
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(ids, want);
    }

    #[test]
    fn all_aliases() {
        for s in ["all", "ALL", "a", "全部"] {
            assert_eq!(IndexSelection::parse(s).unwrap(), IndexSelection::All);
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(IndexSelection::parse("1,x"), Err(SiftError::Selection(_))));
        assert!(matches!(IndexSelection::parse("5-2"), Err(SiftError::Selection(_))));
        assert!(matches!(IndexSelection::parse("-3"), Err(SiftError::Selection(_))));
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let l = listing(3);
        let sel = IndexSelection::parse("0,2,9").unwrap().selection(&l).unwrap();
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(&FileId::from("f2")));
    }

    #[test]
    fn all_selects_every_listed_id() {
        let l = listing(4);
        let sel = IndexSelection::All.selection(&l).unwrap();
        assert_eq!(sel.len(), 4);
    }

    #[test]
    fn huge_range_is_clamped_to_listing() {
        let sel = IndexSelection::parse(&format!("1-{}", usize::MAX)).unwrap();
        let set = sel.selection(&listing(2)).unwrap();
        assert_eq!(set.len(), 2);

        let beyond = IndexSelection::parse(&format!("5-{}", usize::MAX)).unwrap();
        assert!(beyond.selection(&listing(3)).unwrap().is_empty());
    }

    #[test]
    fn range_starting_at_zero_is_clamped() {
        let set = IndexSelection::parse("0-1").unwrap().selection(&listing(2)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&FileId::from("f1")));
    }
}

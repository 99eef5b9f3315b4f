use tracing::debug;

use crate::domain::{Classification, FileEntry};
use crate::policy::{AdRule, FilterPolicy};

/// Rule name reported when a whole-name pattern matched.
pub const PATTERN_RULE: &str = "pattern";

/// Classifies shared files as ads or content from name and size alone.
#[derive(Clone, Debug)]
pub struct AdFilter {
    policy: FilterPolicy,
}

/// Listing split by classification; both halves keep listing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub ad: Vec<FileEntry>,
    pub clean: Vec<FileEntry>,
}

impl Default for AdFilter {
    fn default() -> Self {
        Self::new(FilterPolicy::default())
    }
}

impl AdFilter {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy: policy.normalized(),
        }
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn is_ad(&self, name: &str, size_bytes: u64) -> bool {
        self.matched_rule(name, size_bytes).is_some()
    }

    /// Name of the first rule that flags the file, if any.
    pub fn matched_rule(&self, name: &str, size_bytes: u64) -> Option<&str> {
        let lower = name.to_lowercase();
        let ext = extension_of(&lower);
        if let Some(rule) = self
            .policy
            .rules
            .iter()
            .find(|r| rule_matches(r, &lower, ext, size_bytes))
        {
            return Some(rule.name.as_str());
        }
        if self.policy.patterns.iter().any(|p| lower.contains(p.as_str())) {
            return Some(PATTERN_RULE);
        }
        None
    }

    /// Directories are never ads: their reported size is 0 and would trip
    /// the size thresholds.
    pub fn classify(&self, file: &FileEntry) -> Classification {
        if file.is_dir {
            return Classification::Clean;
        }
        match self.matched_rule(&file.name, file.size_bytes) {
            Some(rule) => {
                debug!(name = %file.name, size = file.size_bytes, rule, "ad file");
                Classification::Ad
            }
            None => Classification::Clean,
        }
    }

    pub fn partition(&self, listing: &[FileEntry]) -> Partition {
        let mut out = Partition::default();
        for f in listing {
            match self.classify(f) {
                Classification::Ad => out.ad.push(f.clone()),
                Classification::Clean => out.clean.push(f.clone()),
            }
        }
        out
    }
}

/// Lower-cased `name` is expected; empty when there is no dot.
fn extension_of(lower: &str) -> &str {
    match lower.rfind('.') {
        Some(i) => &lower[i..],
        None => "",
    }
}

fn rule_matches(rule: &AdRule, lower: &str, ext: &str, size: u64) -> bool {
    if size >= rule.max_size_bytes {
        return false;
    }
    if !rule.extensions.iter().any(|e| e == ext) {
        return false;
    }
    rule.keywords.is_empty() || rule.keywords.iter().any(|k| lower.contains(k.as_str()))
}

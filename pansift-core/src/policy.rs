use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};

pub const MIB: u64 = 1024 * 1024;
pub const KIB: u64 = 1024;

/// Small images and text stubs that ad uploads typically use.
pub const SMALL_MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".txt", ".nfo", ".url",
];

pub const TEXT_STUB_EXTENSIONS: &[&str] = &[".txt", ".nfo", ".url"];

pub const PROMO_KEYWORDS: &[&str] = &[
    "群", "更新", "关注", "订阅", "微信", "qq", "频道", "电报", "telegram", "推荐", "福利", "免费",
    "网址", "网站", "发布", "必看", "说明", "广告", "二维码", "热门影视", "资源", "入群", "扫码",
    "夸克资源", "阿里资源", "百度资源", "更多资源",
];

/// Extra terms used by `FilterPolicy::strict`. Several are short enough to hit
/// legitimate names, so they stay out of the default table.
pub const STRICT_EXTRA_KEYWORDS: &[&str] = &[
    "公众号", "最新", "vx", "wx", "readme", "read me", "notice", "ad", "ads", "adv", "promo",
    "promotion", "follow", "subscribe", "update", "new", "latest", "channel", "qrcode", "discord",
    "tg",
];

pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "热门影视更新", "资源更新", "最新资源", "关注获取", "扫码进群", "加入频道",
];

/// One category of the ad table. A file matches when its extension is listed,
/// its size is strictly below `max_size_bytes`, and (if `keywords` is non-empty)
/// its name contains one of the keywords.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRule {
    pub name: String,
    pub extensions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub max_size_bytes: u64,
}

/// Externally supplied classification table consumed by `AdFilter`.
/// Rules are evaluated in order; `patterns` match anywhere in the name
/// regardless of extension or size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    pub rules: Vec<AdRule>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                AdRule {
                    name: "promo-media".into(),
                    extensions: owned_list(SMALL_MEDIA_EXTENSIONS),
                    keywords: owned_list(PROMO_KEYWORDS),
                    max_size_bytes: 5 * MIB,
                },
                AdRule {
                    name: "tiny-text".into(),
                    extensions: owned_list(TEXT_STUB_EXTENSIONS),
                    keywords: Vec::new(),
                    max_size_bytes: 500 * KIB,
                },
            ],
            patterns: Vec::new(),
        }
    }
}

impl FilterPolicy {
    /// Default table plus the wider keyword list and whole-name patterns.
    pub fn strict() -> Self {
        let mut p = Self::default();
        if let Some(promo) = p.rules.iter_mut().find(|r| r.name == "promo-media") {
            promo.keywords.extend(owned_list(STRICT_EXTRA_KEYWORDS));
        }
        p.patterns = owned_list(SUSPICIOUS_PATTERNS);
        p
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let p: FilterPolicy = serde_json::from_str(s)?;
        p.validate()?;
        Ok(p.normalized())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(SiftError::Policy("rule with empty name".into()));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(SiftError::Policy(format!("duplicate rule name: {}", rule.name)));
            }
            if rule.extensions.is_empty() {
                return Err(SiftError::Policy(format!(
                    "rule {} lists no extensions",
                    rule.name
                )));
            }
            if let Some(bad) = rule.extensions.iter().find(|e| !e.starts_with('.')) {
                return Err(SiftError::Policy(format!(
                    "rule {}: extension {bad:?} must start with '.'",
                    rule.name
                )));
            }
            if rule.keywords.iter().any(|k| k.is_empty()) {
                return Err(SiftError::Policy(format!(
                    "rule {}: empty keyword would match every name",
                    rule.name
                )));
            }
        }
        if self.patterns.iter().any(|p| p.is_empty()) {
            return Err(SiftError::Policy("empty pattern would match every name".into()));
        }
        Ok(())
    }

    /// Lower-cases every comparable string so matching is case-insensitive.
    pub fn normalized(mut self) -> Self {
        for rule in &mut self.rules {
            lower_all(&mut rule.extensions);
            lower_all(&mut rule.keywords);
        }
        lower_all(&mut self.patterns);
        self
    }
}

fn owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn lower_all(words: &mut [String]) {
    for w in words.iter_mut() {
        *w = w.to_lowercase();
    }
}

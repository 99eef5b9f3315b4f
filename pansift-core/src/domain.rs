// pansift_core/src/domain.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque provider file identifier (Baidu `fs_id`, Quark `fid`, Xunlei file id).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        FileId(s.to_string())
    }
}

impl From<String> for FileId {
    fn from(s: String) -> Self {
        FileId(s)
    }
}

impl From<u64> for FileId {
    fn from(n: u64) -> Self {
        FileId(n.to_string())
    }
}

/// One row of a shared-folder listing. Identity is `id`; name and size only
/// feed classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: FileId,
    pub name: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub is_dir: bool,
    /// Per-file capability token some providers require next to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl FileEntry {
    pub fn new(id: impl Into<FileId>, name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size_bytes,
            is_dir: false,
            token: None,
        }
    }

    pub fn dir(id: impl Into<FileId>, name: impl Into<String>) -> Self {
        Self {
            is_dir: true,
            ..Self::new(id, name, 0)
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Ad,
    Clean,
}

impl Classification {
    pub fn is_ad(self) -> bool {
        matches!(self, Classification::Ad)
    }
}

use std::io;
use std::path::Path;

use clap::ValueEnum;
use pansift_core::{FileEntry, FileId, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Generic,
    Baidu,
    Quark,
    Xunlei,
}

/// Ids and sizes show up as numbers or strings depending on the provider.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(u64),
    Str(String),
}

impl NumOrStr {
    fn into_id(self) -> FileId {
        match self {
            NumOrStr::Num(n) => n.into(),
            NumOrStr::Str(s) => s.into(),
        }
    }

    /// A size that does not parse is an error: reading it as 0 would make
    /// the file look like a tiny-text ad.
    fn into_size(self, record: &str) -> Result<u64> {
        match self {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s.trim().parse().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("listing record {record:?}: bad size {s:?}: {e}"),
                )
                .into()
            }),
        }
    }
}

#[derive(Deserialize)]
struct GenericRecord {
    id: NumOrStr,
    name: String,
    #[serde(alias = "size_bytes")]
    size: NumOrStr,
    #[serde(default)]
    is_dir: bool,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Deserialize)]
struct BaiduRecord {
    fs_id: u64,
    server_filename: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    isdir: u8,
}

#[derive(Deserialize)]
struct QuarkRecord {
    fid: String,
    file_name: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    dir: bool,
    #[serde(default)]
    share_fid_token: Option<String>,
}

#[derive(Deserialize)]
struct XunleiRecord {
    id: String,
    name: String,
    size: NumOrStr,
    #[serde(default)]
    kind: String,
}

pub fn load_listing(path: &Path, provider: Provider) -> Result<Vec<FileEntry>> {
    let raw = std::fs::read_to_string(path)?;
    parse_listing(&raw, provider)
}

pub fn parse_listing(raw: &str, provider: Provider) -> Result<Vec<FileEntry>> {
    let doc: Value = serde_json::from_str(raw)?;
    let items = records_of(doc)?;
    items
        .into_iter()
        .map(|v| decode_record(v, provider))
        .collect()
}

/// Accepts a bare array or the usual response envelopes.
fn records_of(doc: Value) -> Result<Vec<Value>> {
    let found = match doc {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("list").or_else(|| map.remove("files")) {
            Some(Value::Array(items)) => Some(items),
            _ => match map.remove("data") {
                Some(Value::Object(mut data)) => match data.remove("list") {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                },
                _ => None,
            },
        },
        _ => None,
    };
    found.ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "listing: no file array found").into()
    })
}

fn decode_record(v: Value, provider: Provider) -> Result<FileEntry> {
    let entry = match provider {
        Provider::Generic => {
            let r: GenericRecord = serde_json::from_value(v)?;
            let size_bytes = r.size.into_size(&r.name)?;
            FileEntry {
                id: r.id.into_id(),
                name: r.name,
                size_bytes,
                is_dir: r.is_dir,
                token: r.token,
            }
        }
        Provider::Baidu => {
            let r: BaiduRecord = serde_json::from_value(v)?;
            FileEntry {
                id: r.fs_id.into(),
                name: r.server_filename,
                size_bytes: r.size,
                is_dir: r.isdir != 0,
                token: None,
            }
        }
        Provider::Quark => {
            let r: QuarkRecord = serde_json::from_value(v)?;
            FileEntry {
                id: r.fid.into(),
                name: r.file_name,
                size_bytes: r.size,
                is_dir: r.dir,
                token: r.share_fid_token,
            }
        }
        Provider::Xunlei => {
            let r: XunleiRecord = serde_json::from_value(v)?;
            let size_bytes = r.size.into_size(&r.name)?;
            FileEntry {
                id: r.id.into(),
                name: r.name,
                size_bytes,
                is_dir: r.kind == "drive#folder",
                token: None,
            }
        }
    };
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pansift_core::SiftError;

    #[test]
    fn baidu_envelope() {
        let raw = r#"{"errno":0,"list":[
            {"fs_id":123456789,"server_filename":"E01.mp4","size":1048576000,"isdir":0},
            {"fs_id":42,"server_filename":"Extras","size":0,"isdir":1}
        ]}"#;
        let l = parse_listing(raw, Provider::Baidu).unwrap();
        assert_eq!(l[0].id.as_str(), "123456789");
        assert_eq!(l[0].size_bytes, 1048576000);
        assert!(l[1].is_dir);
    }

    #[test]
    fn quark_keeps_share_tokens() {
        let raw = r#"{"status":200,"data":{"list":[
            {"fid":"a1b2","file_name":"加群.jpg","size":2048,"dir":false,"share_fid_token":"t-1"}
        ]}}"#;
        let l = parse_listing(raw, Provider::Quark).unwrap();
        assert_eq!(l[0].token.as_deref(), Some("t-1"));
        assert_eq!(l[0].name, "加群.jpg");
    }

    #[test]
    fn xunlei_string_sizes_and_folders() {
        let raw = r#"{"files":[
            {"id":"VN1","name":"movie.mkv","size":"2147483648","kind":"drive#file"},
            {"id":"VN2","name":"sub","size":"0","kind":"drive#folder"}
        ]}"#;
        let l = parse_listing(raw, Provider::Xunlei).unwrap();
        assert_eq!(l[0].size_bytes, 2147483648);
        assert!(l[1].is_dir);
    }

    #[test]
    fn generic_accepts_numeric_ids() {
        let raw = r#"[{"id":7,"name":"a.txt","size_bytes":10},{"id":"x","name":"b.mkv","size":"99"}]"#;
        let l = parse_listing(raw, Provider::Generic).unwrap();
        assert_eq!(l[0].id.as_str(), "7");
        assert_eq!(l[1].size_bytes, 99);
    }

    #[test]
    fn unparsable_sizes_are_errors() {
        for bad in ["abc", "-1", "1.5GB", ""] {
            let raw = format!(r#"[{{"id":"n1","name":"notes.txt","size":"{bad}"}}]"#);
            let err = parse_listing(&raw, Provider::Generic).unwrap_err();
            match err {
                SiftError::Io(e) => assert!(e.to_string().contains("notes.txt"), "{e}"),
                other => panic!("size {bad:?}: unexpected {other:?}"),
            }
        }
        let raw = r#"{"files":[{"id":"VN1","name":"E01.mkv","size":"n/a","kind":"drive#file"}]}"#;
        assert!(matches!(parse_listing(raw, Provider::Xunlei), Err(SiftError::Io(_))));
    }

    #[test]
    fn rejects_documents_without_files() {
        let err = parse_listing(r#"{"errno":-9}"#, Provider::Baidu).unwrap_err();
        assert!(matches!(err, SiftError::Io(_)));
        let err = parse_listing(r#"[{"name":"x"}]"#, Provider::Baidu).unwrap_err();
        assert!(matches!(err, SiftError::Json(_)));
    }
}

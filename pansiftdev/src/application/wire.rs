//! Provider request bodies for a planned transfer. The core only knows
//! `TransferPlan`; each provider's save endpoint wants its own shape.

use std::io;

use pansift_core::{FileId, PlanOutcome, Result, TransferPlan};
use serde_json::{Value, json};

use super::listing::Provider;

pub fn render(provider: Provider, outcome: &PlanOutcome, dest: &str) -> Result<Value> {
    match provider {
        Provider::Generic => Ok(json!({
            "dest": dest,
            "plan": outcome.plan,
        })),
        Provider::Baidu => baidu(outcome, dest),
        Provider::Quark => quark(outcome, dest),
        Provider::Xunlei => Ok(json!({
            "parent_id": dest,
            "file_ids": ids_of(outcome),
        })),
    }
}

/// Baidu's share/transfer form has no exclude mode: always send the
/// resolved fs_id list.
fn baidu(outcome: &PlanOutcome, dest: &str) -> Result<Value> {
    let fs_ids = outcome
        .to_transfer
        .iter()
        .map(|f| {
            f.id.as_str().parse::<u64>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("baidu fs_id must be numeric, got {:?}: {e}", f.id.as_str()),
                )
                .into()
            })
        })
        .collect::<Result<Vec<u64>>>()?;
    Ok(json!({
        "fsidlist": serde_json::to_string(&fs_ids)?,
        "path": dest,
    }))
}

/// `pdir_save_all` saves everything not excluded, so exclude bodies must
/// list the ads as well as the unselected clean files.
fn quark(outcome: &PlanOutcome, dest: &str) -> Result<Value> {
    let mut body = json!({
        "to_pdir_fid": dest,
        "scene": "link",
    });
    match &outcome.plan {
        TransferPlan::All { excluded } => {
            body["pdir_save_all"] = json!(true);
            if !excluded.is_empty() {
                body["exclude_fids"] = json!(excluded);
            }
        }
        TransferPlan::IncludeList { ids, tokens } => {
            let tokens = ids
                .iter()
                .zip(tokens)
                .map(|(id, t)| {
                    t.clone().ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("quark fid {id} has no share_fid_token"),
                        )
                        .into()
                    })
                })
                .collect::<Result<Vec<String>>>()?;
            body["fid_list"] = json!(ids);
            body["fid_token_list"] = json!(tokens);
        }
        TransferPlan::ExcludeList { ids } => {
            let excluded: Vec<&FileId> =
                ids.iter().chain(outcome.ads.iter().map(|f| &f.id)).collect();
            body["pdir_save_all"] = json!(true);
            body["exclude_fids"] = json!(excluded);
        }
    }
    Ok(body)
}

fn ids_of(outcome: &PlanOutcome) -> Vec<&FileId> {
    outcome.to_transfer.iter().map(|f| &f.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pansift_core::{AdFilter, FileEntry, SelectionSet, SiftError, plan_transfer};

    fn outcome(listing: &[FileEntry], sel: &[&str]) -> PlanOutcome {
        let sel: SelectionSet = sel.iter().copied().collect();
        plan_transfer(listing, &sel, &AdFilter::default()).unwrap()
    }

    fn quark_listing() -> Vec<FileEntry> {
        let mut l: Vec<FileEntry> = (1..=4)
            .map(|i| {
                FileEntry::new(format!("q{i}"), format!("E{i}.mp4"), 1 << 30)
                    .with_token(format!("t{i}"))
            })
            .collect();
        l.push(FileEntry::new("qad", "扫码入群.png", 4096).with_token("tad"));
        l
    }

    #[test]
    fn quark_all_excludes_ads() {
        let body = render(Provider::Quark, &outcome(&quark_listing(), &[]), "dst").unwrap();
        assert_eq!(body["pdir_save_all"], true);
        assert_eq!(body["exclude_fids"], json!(["qad"]));
        assert_eq!(body["to_pdir_fid"], "dst");
    }

    #[test]
    fn quark_include_pairs_tokens() {
        let body = render(Provider::Quark, &outcome(&quark_listing(), &["q3"]), "d").unwrap();
        assert_eq!(body["fid_list"], json!(["q3"]));
        assert_eq!(body["fid_token_list"], json!(["t3"]));
        assert!(body.get("pdir_save_all").is_none());
    }

    #[test]
    fn quark_exclude_list() {
        let out = outcome(&quark_listing(), &["q1", "q2", "q4"]);
        let body = render(Provider::Quark, &out, "d").unwrap();
        assert_eq!(body["pdir_save_all"], true);
        assert_eq!(body["exclude_fids"], json!(["q3", "qad"]));
    }

    #[test]
    fn quark_exclude_list_drops_ads_even_when_selected() {
        let out = outcome(&quark_listing(), &["q1", "q2", "qad"]);
        assert_eq!(out.plan.mode(), "exclude_list");
        let body = render(Provider::Quark, &out, "d").unwrap();
        let excluded = body["exclude_fids"].as_array().unwrap();
        assert!(excluded.contains(&json!("qad")));
        assert!(excluded.contains(&json!("q3")));
        assert!(excluded.contains(&json!("q4")));
        assert_eq!(excluded.len(), 3);
    }

    #[test]
    fn quark_include_without_token_fails() {
        let l: Vec<FileEntry> = (1..=3)
            .map(|i| FileEntry::new(format!("q{i}"), "x.mkv", 1 << 30))
            .collect();
        let err = render(Provider::Quark, &outcome(&l, &["q1"]), "d").unwrap_err();
        assert!(matches!(err, SiftError::Io(_)));
    }

    #[test]
    fn baidu_always_lists_fs_ids() {
        let l = vec![
            FileEntry::new(11u64, "E1.mkv", 1 << 30),
            FileEntry::new(12u64, "E2.mkv", 1 << 30),
            FileEntry::new(13u64, "更多资源.jpg", 1024),
        ];
        let body = render(Provider::Baidu, &outcome(&l, &[]), "/影视/剧集").unwrap();
        assert_eq!(body["fsidlist"], "[11,12]");
        assert_eq!(body["path"], "/影视/剧集");
    }

    #[test]
    fn xunlei_lists_file_ids() {
        let l = vec![
            FileEntry::new("VA", "a.mkv", 1 << 30),
            FileEntry::new("VB", "b.mkv", 1 << 30),
        ];
        let body = render(Provider::Xunlei, &outcome(&l, &["VB"]), "root").unwrap();
        assert_eq!(body["file_ids"], json!(["VB"]));
        assert_eq!(body["parent_id"], "root");
    }

    #[test]
    fn generic_embeds_plan() {
        let l = vec![FileEntry::new("1", "a.mkv", 1 << 30)];
        let body = render(Provider::Generic, &outcome(&l, &[]), "/x").unwrap();
        assert_eq!(body["plan"]["mode"], "all");
    }
}

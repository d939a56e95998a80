use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cryptorun_proof::reports_dir;

/// Per-run manifest written once at the end of a scan tick (spec.md §3/§6),
/// the audit trail's entry point: which config produced this run, over how
/// large a universe, starting when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanRunManifest {
    pub schema_version: u32,
    pub run_id: Uuid,
    pub config_hash: String,
    pub started_at_utc: i64,
    pub universe_size: usize,
}

impl ScanRunManifest {
    pub fn new(config_hash: impl Into<String>, started_at_utc: i64, universe_size: usize) -> Self {
        Self {
            schema_version: 1,
            run_id: Uuid::new_v4(),
            config_hash: config_hash.into(),
            started_at_utc,
            universe_size,
        }
    }
}

pub fn manifest_path(root: &Path, date: NaiveDate) -> PathBuf {
    reports_dir(root, date).join("scan_run_manifest.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_lands_under_reports_dir() {
        let root = Path::new("artifacts");
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        assert_eq!(
            manifest_path(root, date),
            Path::new("artifacts/proofs/2026-07-28/reports/scan_run_manifest.json")
        );
    }

    #[test]
    fn new_manifest_carries_given_fields() {
        let m = ScanRunManifest::new("abc123", 1_700_000_000, 42);
        assert_eq!(m.schema_version, 1);
        assert_eq!(m.config_hash, "abc123");
        assert_eq!(m.universe_size, 42);
    }
}

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// `artifacts/proofs/<date>/microstructure/` (spec.md §4.7/§6).
pub fn microstructure_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join("proofs")
        .join(date.format("%Y-%m-%d").to_string())
        .join("microstructure")
}

/// `artifacts/proofs/<date>/reports/` (spec.md §6).
pub fn reports_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join("proofs")
        .join(date.format("%Y-%m-%d").to_string())
        .join("reports")
}

pub fn master_proof_path(root: &Path, date: NaiveDate, symbol: &str) -> PathBuf {
    microstructure_dir(root, date).join(format!("{symbol}_master_proof.json"))
}

pub fn venue_proof_path(root: &Path, date: NaiveDate, symbol: &str, venue: &str) -> PathBuf {
    microstructure_dir(root, date).join(format!("{symbol}_{venue}_proof.json"))
}

pub fn metrics_summary_path(root: &Path, date: NaiveDate, symbol: &str) -> PathBuf {
    microstructure_dir(root, date).join(format!("{symbol}_metrics_summary.json"))
}

pub fn audit_report_path(root: &Path, date: NaiveDate, hhmmss: &str) -> PathBuf {
    reports_dir(root, date).join(format!("microstructure_audit_{hhmmss}.json"))
}

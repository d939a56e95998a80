use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use cryptorun_schemas::AssetEligibilityResult;

use crate::error::ProofWriteError;
use crate::layout::{master_proof_path, metrics_summary_path, venue_proof_path};
use crate::summary::MetricsSummary;
use crate::writer::write_atomic_json;

/// Writes the three artifact kinds spec.md §4.7 names for one symbol's
/// eligibility result at `date`: the master proof bundle, one proof file
/// per *eligible* venue, and a metrics summary. Returns every path written.
///
/// Each write is independently atomic (temp-then-rename); a failure on one
/// artifact does not roll back artifacts already written for this symbol —
/// the caller decides whether a partial write still counts as success.
pub fn write_eligibility_artifacts(
    root: &Path,
    date: NaiveDate,
    result: &AssetEligibilityResult,
) -> Result<Vec<PathBuf>, ProofWriteError> {
    let mut written = Vec::new();

    let master_path = master_proof_path(root, date, &result.symbol);
    write_atomic_json(&master_path, &result.master)?;
    written.push(master_path);

    for bundle in result.master.venue_bundles.iter().filter(|b| b.all_passed()) {
        let path = venue_proof_path(root, date, &result.symbol, bundle.venue.as_str());
        write_atomic_json(&path, bundle)?;
        written.push(path);
    }

    let summary = MetricsSummary::from_result(result);
    let summary_path = metrics_summary_path(root, date, &result.symbol);
    write_atomic_json(&summary_path, &summary)?;
    written.push(summary_path);

    Ok(written)
}

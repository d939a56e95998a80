use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cryptorun_schemas::{AssetEligibilityResult, Venue};

use crate::error::ProofWriteError;
use crate::layout::audit_report_path;
use crate::writer::write_atomic_json;

/// Per-venue running average of spread and depth across every symbol
/// checked that day, regardless of pass/fail (spec.md §4.7).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VenueRunningAverage {
    pub venue: Venue,
    pub symbols_checked: usize,
    pub avg_spread_bps: f64,
    pub avg_depth_usd: f64,
}

/// Daily summary written once to `artifacts/proofs/<date>/reports/
/// microstructure_audit_<HHMMSS>.json` (spec.md §4.7/§6). Built from every
/// [`AssetEligibilityResult`] produced that day; never recomputes the
/// underlying proofs, only aggregates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub date: NaiveDate,
    pub generated_at: i64,
    pub total_checked: usize,
    pub eligible_count: usize,
    pub ineligible_count: usize,
    pub eligible_symbols: Vec<String>,
    pub ineligible_symbols: Vec<String>,
    pub per_venue: Vec<VenueRunningAverage>,
}

impl AuditReport {
    /// Aggregates `results` (one per symbol checked that day) into a single
    /// report. `eligible_symbols`/`ineligible_symbols` are sorted so the
    /// artifact is stable regardless of the order results arrived in.
    pub fn from_results(date: NaiveDate, generated_at: i64, results: &[AssetEligibilityResult]) -> Self {
        let mut eligible_symbols = Vec::new();
        let mut ineligible_symbols = Vec::new();

        #[derive(Default)]
        struct Accum {
            count: usize,
            spread_sum: f64,
            depth_sum: f64,
        }
        let mut by_venue: BTreeMap<Venue, Accum> = BTreeMap::new();

        for result in results {
            if result.overall_eligible {
                eligible_symbols.push(result.symbol.clone());
            } else {
                ineligible_symbols.push(result.symbol.clone());
            }
            for bundle in &result.master.venue_bundles {
                let acc = by_venue.entry(bundle.venue).or_default();
                acc.count += 1;
                acc.spread_sum += bundle.spread_proof.actual;
                acc.depth_sum += bundle.depth_proof.actual;
            }
        }

        eligible_symbols.sort();
        ineligible_symbols.sort();

        let per_venue = by_venue
            .into_iter()
            .map(|(venue, acc)| VenueRunningAverage {
                venue,
                symbols_checked: acc.count,
                avg_spread_bps: if acc.count > 0 { acc.spread_sum / acc.count as f64 } else { 0.0 },
                avg_depth_usd: if acc.count > 0 { acc.depth_sum / acc.count as f64 } else { 0.0 },
            })
            .collect();

        Self {
            date,
            generated_at,
            total_checked: results.len(),
            eligible_count: eligible_symbols.len(),
            ineligible_count: ineligible_symbols.len(),
            eligible_symbols,
            ineligible_symbols,
            per_venue,
        }
    }
}

/// Writes the report to `artifacts/proofs/<date>/reports/
/// microstructure_audit_<hhmmss>.json` with the same atomic discipline as
/// every other artifact (spec.md §4.7/§9).
pub fn write_audit_report(
    root: &Path,
    date: NaiveDate,
    hhmmss: &str,
    report: &AuditReport,
) -> Result<PathBuf, ProofWriteError> {
    let path = audit_report_path(root, date, hhmmss);
    write_atomic_json(&path, report)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptorun_schemas::{
        L1Snapshot, MasterProofBundle, Operator, ProofBundle, Symbol, ValidationProof,
    };

    fn l1(venue: Venue) -> L1Snapshot {
        L1Snapshot {
            symbol: Symbol::try_new("BTCUSD").unwrap(),
            venue,
            timestamp: 1_700_000_000,
            bid_price: 100.0,
            bid_size: 1.0,
            ask_price: 100.1,
            ask_size: 1.0,
            last: 100.05,
            sequence: 1,
        }
    }

    fn proof(metric: &str, actual: f64, passed_floor: f64) -> ValidationProof {
        ValidationProof::evaluate(metric, actual, Operator::Ge, passed_floor)
    }

    fn result(symbol: &str, venue: Venue, spread: f64, depth: f64, eligible: bool) -> AssetEligibilityResult {
        let floor = if eligible { 0.0 } else { f64::INFINITY };
        let bundle = ProofBundle::new(
            symbol,
            venue,
            l1(venue),
            None,
            proof("spread_bps", spread, floor),
            proof("depth_usd", depth, floor),
            proof("vadr", 2.0, floor),
            1_700_000_000,
        );
        let master = MasterProofBundle {
            symbol: symbol.to_string(),
            checked_at: 1_700_000_000,
            venue_bundles: vec![bundle],
        };
        AssetEligibilityResult::from_master(master, vec![])
    }

    #[test]
    fn aggregates_counts_and_symbol_lists() {
        let results = vec![
            result("BTCUSD", Venue::Kraken, 10.0, 100_000.0, true),
            result("ETHUSD", Venue::Kraken, 20.0, 50_000.0, false),
        ];
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let report = AuditReport::from_results(date, 1_700_000_000, &results);

        assert_eq!(report.total_checked, 2);
        assert_eq!(report.eligible_count, 1);
        assert_eq!(report.ineligible_count, 1);
        assert_eq!(report.eligible_symbols, vec!["BTCUSD".to_string()]);
        assert_eq!(report.ineligible_symbols, vec!["ETHUSD".to_string()]);
    }

    #[test]
    fn per_venue_averages_spread_and_depth_across_all_checks() {
        let results = vec![
            result("BTCUSD", Venue::Kraken, 10.0, 100_000.0, true),
            result("ETHUSD", Venue::Kraken, 20.0, 50_000.0, false),
        ];
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let report = AuditReport::from_results(date, 1_700_000_000, &results);

        assert_eq!(report.per_venue.len(), 1);
        let kraken = &report.per_venue[0];
        assert_eq!(kraken.venue, Venue::Kraken);
        assert_eq!(kraken.symbols_checked, 2);
        assert!((kraken.avg_spread_bps - 15.0).abs() < 1e-9);
        assert!((kraken.avg_depth_usd - 75_000.0).abs() < 1e-9);
    }

    #[test]
    fn empty_results_produce_zeroed_report() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let report = AuditReport::from_results(date, 1_700_000_000, &[]);
        assert_eq!(report.total_checked, 0);
        assert!(report.per_venue.is_empty());
    }

    #[test]
    fn write_audit_report_lands_at_the_declared_path() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let report = AuditReport::from_results(date, 1_700_000_000, &[]);
        let path = write_audit_report(dir.path(), date, "235959", &report).unwrap();
        assert!(path.exists());
        assert!(path.to_str().unwrap().ends_with("microstructure_audit_235959.json"));
    }
}

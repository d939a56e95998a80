use cryptorun_schemas::{
    DataSource, L1Snapshot, L2Snapshot, MicrostructureMetrics, Recommendation, ValidationResult,
};

use crate::thresholds::{MicrostructureThresholds, SourceTier};

/// Everything the validator needs for one symbol/venue/tick. Borrowed, not
/// owned: the caller (venue adapter + universe aggregator) keeps the
/// snapshots alive for the duration of the call.
pub struct MicrostructureInputs<'a> {
    pub l1: &'a L1Snapshot,
    pub l2: &'a L2Snapshot,
    /// Source-clock "now", not wall-clock (spec.md §9).
    pub now: i64,
    pub source_tier: SourceTier,
    pub is_exchange_native: bool,
    pub data_source: &'a DataSource,
    pub has_trades: bool,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub avg_price: f64,
    pub circulating_supply: f64,
}

/// `daily_range / volume_ratio`, per spec.md §4.2. `volume_ratio`'s
/// denominator is specified exactly as `market_cap * avg_price / supply`;
/// this is the distilled approximation, not a first-class ADV signal.
fn compute_vadr(inputs: &MicrostructureInputs<'_>) -> f64 {
    if inputs.low_24h <= 0.0 {
        return 0.0;
    }
    let daily_range = (inputs.high_24h - inputs.low_24h) / inputs.low_24h;

    if inputs.circulating_supply <= 0.0 || inputs.market_cap <= 0.0 || inputs.avg_price <= 0.0 {
        return 0.0;
    }
    let denom = inputs.market_cap * inputs.avg_price / inputs.circulating_supply;
    if denom <= 0.0 {
        return 0.0;
    }
    let volume_ratio = inputs.volume_24h / denom;
    if volume_ratio <= 0.0 {
        return 0.0;
    }
    daily_range / volume_ratio
}

/// Additive deduction ladder starting at 100 (spec.md §4.2). Each
/// deduction is independent; several may apply to the same snapshot.
fn compute_data_quality(inputs: &MicrostructureInputs<'_>, staleness_secs: i64) -> f64 {
    let mut score: f64 = 100.0;

    let missing_bid_ask = inputs.l1.bid_price <= 0.0 || inputs.l1.ask_price <= 0.0;
    if missing_bid_ask {
        score -= 30.0;
    }
    if inputs.l2.bids.is_empty() || inputs.l2.asks.is_empty() {
        score -= 25.0;
    }
    if !inputs.has_trades {
        score -= 15.0;
    }
    if inputs.l2.is_crossed() {
        score -= 20.0;
    }

    if !missing_bid_ask {
        const TOLERANCE: f64 = 1e-9;
        if let Some(best_bid) = inputs.l2.best_bid() {
            if (best_bid - inputs.l1.bid_price).abs() > best_bid.abs() * 1e-4 + TOLERANCE {
                score -= 10.0;
            }
        }
        if let Some(best_ask) = inputs.l2.best_ask() {
            if (best_ask - inputs.l1.ask_price).abs() > best_ask.abs() * 1e-4 + TOLERANCE {
                score -= 10.0;
            }
        }
    }

    if staleness_secs > 30 {
        score -= 15.0;
    } else if staleness_secs > 10 {
        score -= 5.0;
    }

    if inputs.l2.level_count() < 10 {
        score -= 5.0;
    }

    score.clamp(0.0, 100.0)
}

/// Runs the full C2 check battery over one symbol/venue/tick and reports a
/// pass/fail per check plus an overall recommendation. Single-pass, no
/// cross-symbol coupling (spec.md §4.2 "batch operation").
pub fn validate(inputs: &MicrostructureInputs<'_>, thresholds: &MicrostructureThresholds) -> ValidationResult {
    let spread_bps = inputs.l1.spread_bps();
    let depth_usd = inputs.l2.depth_within_pct_usd(0.02);
    let vadr = compute_vadr(inputs);
    let staleness_secs = inputs.now - inputs.l1.timestamp;
    let data_quality = compute_data_quality(inputs, staleness_secs);

    let spread_ok = spread_bps < thresholds.max_spread_bps;
    let depth_ok = depth_usd >= thresholds.min_depth_usd;
    let vadr_ok = vadr >= thresholds.min_vadr;
    let staleness_ok = staleness_secs <= thresholds.max_staleness_for(inputs.source_tier);

    let impact_bps = if depth_usd > 0.0 {
        (10_000.0 / depth_usd) * spread_bps
    } else {
        f64::INFINITY
    };
    let impact_ok = impact_bps <= thresholds.max_impact_bps;

    let exchange_native_ok = inputs.is_exchange_native && !inputs.data_source.is_banned_aggregator();

    let mut failure_reasons = Vec::new();
    let mut warnings = Vec::new();

    if !spread_ok {
        failure_reasons.push(format!(
            "spread_bps={spread_bps:.2} exceeds max {:.2}",
            thresholds.max_spread_bps
        ));
    }
    if !depth_ok {
        failure_reasons.push(format!(
            "depth_usd_plus_minus_2pct={depth_usd:.2} below min {:.2}",
            thresholds.min_depth_usd
        ));
    }
    if !vadr_ok {
        failure_reasons.push(format!(
            "vadr={vadr:.4} below min {:.4}",
            thresholds.min_vadr
        ));
    }
    if !staleness_ok {
        failure_reasons.push(format!(
            "staleness_secs={staleness_secs} exceeds max {}",
            thresholds.max_staleness_for(inputs.source_tier)
        ));
    }
    if !impact_ok {
        failure_reasons.push(format!(
            "market_impact_bps={impact_bps:.2} exceeds max {:.2}",
            thresholds.max_impact_bps
        ));
    }
    if !exchange_native_ok {
        failure_reasons.push(format!(
            "source '{}' is not exchange-native or is a banned aggregator",
            inputs.data_source.as_str()
        ));
    }
    if !inputs.l1.valid() {
        failure_reasons.push("L1 snapshot invalid: ask must exceed bid, both positive".to_string());
    }

    if data_quality < 80.0 {
        warnings.push(format!("data_quality={data_quality:.1} below 80"));
    }
    if inputs.l2.level_count() < 10 {
        warnings.push("order book depth below 10 levels".to_string());
    }

    let overall_valid = failure_reasons.is_empty();

    let metrics = MicrostructureMetrics {
        spread_bps,
        depth_usd_plus_minus_2pct: depth_usd,
        vadr,
        adv: inputs.volume_24h,
        data_quality,
        spread_ok,
        depth_ok,
        vadr_ok,
        staleness_ok,
        impact_ok,
        exchange_native_ok,
        overall_valid,
    }
    .clamp_data_quality();

    // confidence_score tracks data_quality directly: both are derived from
    // the same deduction ladder and spec.md §4.2 does not define a separate
    // formula for it.
    let confidence_score = metrics.data_quality;

    let recommendation = if !overall_valid {
        Recommendation::Rejected
    } else if warnings.is_empty() && confidence_score >= 85.0 {
        Recommendation::Approved
    } else {
        Recommendation::ApprovedWithCaution
    };

    ValidationResult {
        passed: overall_valid,
        failure_reasons,
        warnings,
        metrics,
        confidence_score,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptorun_schemas::{L2Level, Symbol, Venue};

    fn sym() -> Symbol {
        Symbol::try_new("BTCUSD").unwrap()
    }

    fn clean_l1(now: i64) -> L1Snapshot {
        L1Snapshot {
            symbol: sym(),
            venue: Venue::Kraken,
            timestamp: now,
            bid_price: 50_000.0,
            bid_size: 2.0,
            ask_price: 50_010.0,
            ask_size: 2.0,
            last: 50_005.0,
            sequence: 1,
        }
    }

    fn ladder(n: usize, best_bid: f64, best_ask: f64) -> L2Snapshot {
        let bids = (0..n)
            .map(|i| L2Level {
                price: best_bid - i as f64,
                size: 5.0,
            })
            .collect();
        let asks = (0..n)
            .map(|i| L2Level {
                price: best_ask + i as f64,
                size: 5.0,
            })
            .collect();
        L2Snapshot {
            symbol: sym(),
            venue: Venue::Kraken,
            timestamp: now_stub(),
            bids,
            asks,
            sequence: 1,
        }
    }

    fn now_stub() -> i64 {
        1_700_000_000
    }

    fn clean_inputs() -> (L1Snapshot, L2Snapshot) {
        let l1 = clean_l1(now_stub());
        let l2 = ladder(15, 50_000.0, 50_010.0);
        (l1, l2)
    }

    fn native_source() -> DataSource {
        Venue::Kraken.into()
    }

    #[test]
    fn clean_snapshot_passes_default_profile() {
        let (l1, l2) = clean_inputs();
        let inputs = MicrostructureInputs {
            l1: &l1,
            l2: &l2,
            now: now_stub(),
            source_tier: SourceTier::Native,
            is_exchange_native: true,
            data_source: &native_source(),
            has_trades: true,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            volume_24h: 5_000_000.0,
            market_cap: 900_000_000_000.0,
            avg_price: 50_000.0,
            circulating_supply: 19_500_000.0,
        };
        let thresholds = crate::thresholds::MicrostructureProfile::Default.thresholds();
        let result = validate(&inputs, &thresholds);
        assert!(result.passed, "{:?}", result.failure_reasons);
        assert_eq!(result.recommendation, Recommendation::Approved);
    }

    #[test]
    fn wide_spread_fails_spread_check() {
        let l1 = L1Snapshot {
            bid_price: 50_000.0,
            ask_price: 50_400.0,
            ..clean_l1(now_stub())
        };
        let l2 = ladder(15, 50_000.0, 50_400.0);
        let inputs = MicrostructureInputs {
            l1: &l1,
            l2: &l2,
            now: now_stub(),
            source_tier: SourceTier::Native,
            is_exchange_native: true,
            data_source: &native_source(),
            has_trades: true,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            volume_24h: 5_000_000.0,
            market_cap: 900_000_000_000.0,
            avg_price: 50_000.0,
            circulating_supply: 19_500_000.0,
        };
        let thresholds = crate::thresholds::MicrostructureProfile::Default.thresholds();
        let result = validate(&inputs, &thresholds);
        assert!(!result.passed);
        assert!(!result.metrics.spread_ok);
    }

    #[test]
    fn stale_snapshot_fails_native_tier_quickly() {
        let l1 = clean_l1(now_stub() - 60);
        let l2 = ladder(15, 50_000.0, 50_010.0);
        let inputs = MicrostructureInputs {
            l1: &l1,
            l2: &l2,
            now: now_stub(),
            source_tier: SourceTier::Native,
            is_exchange_native: true,
            data_source: &native_source(),
            has_trades: true,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            volume_24h: 5_000_000.0,
            market_cap: 900_000_000_000.0,
            avg_price: 50_000.0,
            circulating_supply: 19_500_000.0,
        };
        let thresholds = crate::thresholds::MicrostructureProfile::Default.thresholds();
        let result = validate(&inputs, &thresholds);
        assert!(!result.metrics.staleness_ok);
        assert!(!result.passed);
    }

    #[test]
    fn banned_aggregator_source_fails_exchange_native_check() {
        let (l1, l2) = clean_inputs();
        let aggregator = DataSource::new("coingecko");
        let inputs = MicrostructureInputs {
            l1: &l1,
            l2: &l2,
            now: now_stub(),
            source_tier: SourceTier::Aggregator,
            is_exchange_native: false,
            data_source: &aggregator,
            has_trades: true,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            volume_24h: 5_000_000.0,
            market_cap: 900_000_000_000.0,
            avg_price: 50_000.0,
            circulating_supply: 19_500_000.0,
        };
        let thresholds = crate::thresholds::MicrostructureProfile::Default.thresholds();
        let result = validate(&inputs, &thresholds);
        assert!(!result.metrics.exchange_native_ok);
        assert!(!result.passed);
    }

    #[test]
    fn empty_ladder_deducts_from_data_quality_and_warns() {
        let l1 = clean_l1(now_stub());
        let l2 = L2Snapshot {
            symbol: sym(),
            venue: Venue::Kraken,
            timestamp: now_stub(),
            bids: Vec::new(),
            asks: Vec::new(),
            sequence: 1,
        };
        let inputs = MicrostructureInputs {
            l1: &l1,
            l2: &l2,
            now: now_stub(),
            source_tier: SourceTier::Native,
            is_exchange_native: true,
            data_source: &native_source(),
            has_trades: true,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            volume_24h: 5_000_000.0,
            market_cap: 900_000_000_000.0,
            avg_price: 50_000.0,
            circulating_supply: 19_500_000.0,
        };
        let thresholds = crate::thresholds::MicrostructureProfile::Default.thresholds();
        let result = validate(&inputs, &thresholds);
        assert!(result.metrics.data_quality <= 75.0);
        assert!(!result.warnings.is_empty());
    }
}

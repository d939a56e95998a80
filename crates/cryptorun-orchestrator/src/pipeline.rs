use cryptorun_microstructure::{validate, MicrostructureInputs, MicrostructureThresholds, SourceTier};
use cryptorun_policy::{validate_all, PolicySnapshot, ValidateAllInput};
use cryptorun_schemas::{
    AssetEligibilityResult, DataSource, DataType, L1Snapshot, L2Snapshot, MasterProofBundle,
    Operator, ProofBundle, ReasonCode, Symbol, ValidationProof, Venue,
};

use crate::inputs::VenueReferenceData;

/// Policy pre-check (C1) run before any venue fetch: emergency controls,
/// USD-only, venue preference, aggregator ban, stablecoin depeg (spec.md
/// §4.1). Returns the failing reason code, or `None` if admitted.
pub fn policy_precheck(
    snapshot: &PolicySnapshot,
    symbol: &Symbol,
    venue: Option<Venue>,
    allow_fallback: bool,
    data_source: &DataSource,
    price: f64,
) -> Option<ReasonCode> {
    let input = ValidateAllInput {
        symbol_raw: symbol.as_str(),
        venue,
        allow_fallback,
        data_source,
        data_type: DataType::OrderBook,
        price,
    };
    validate_all(snapshot, &input).err().map(|e| e.code)
}

/// Builds one venue's [`ProofBundle`] from a fetched order book plus the
/// venue's reference data, against the microstructure thresholds in force
/// (spec.md §4.2/§4.7). `validate()` returns aggregate metrics only; the
/// three named proofs the bundle requires are derived from those metrics
/// here.
pub fn build_proof_bundle(
    symbol: &Symbol,
    venue: Venue,
    now: i64,
    reference: &VenueReferenceData,
    l1: L1Snapshot,
    l2: L2Snapshot,
    thresholds: &MicrostructureThresholds,
) -> ProofBundle {
    let data_source = DataSource::new(reference.data_source.clone());
    let inputs = MicrostructureInputs {
        l1: &l1,
        l2: &l2,
        now,
        source_tier: reference.source_tier,
        is_exchange_native: reference.is_exchange_native,
        data_source: &data_source,
        has_trades: reference.has_trades,
        high_24h: reference.high_24h,
        low_24h: reference.low_24h,
        volume_24h: reference.volume_24h,
        market_cap: reference.market_cap,
        avg_price: reference.avg_price,
        circulating_supply: reference.circulating_supply,
    };
    let result = validate(&inputs, thresholds);

    let spread_proof = ValidationProof::evaluate(
        "spread_bps",
        result.metrics.spread_bps,
        Operator::Lt,
        thresholds.max_spread_bps,
    );
    let depth_proof = ValidationProof::evaluate(
        "depth_usd_plus_minus_2pct",
        result.metrics.depth_usd_plus_minus_2pct,
        Operator::Ge,
        thresholds.min_depth_usd,
    );
    let vadr_proof = ValidationProof::evaluate(
        "vadr",
        result.metrics.vadr,
        Operator::Ge,
        thresholds.min_vadr,
    );

    ProofBundle::new(
        symbol.as_str(),
        venue,
        l1,
        Some(l2),
        spread_proof,
        depth_proof,
        vadr_proof,
        now,
    )
}

/// Folds every venue's [`ProofBundle`] checked for one symbol into an
/// [`AssetEligibilityResult`] (spec.md §4.8).
pub fn eligibility_from_bundles(
    symbol: &Symbol,
    now: i64,
    bundles: Vec<ProofBundle>,
    venue_errors: Vec<String>,
) -> AssetEligibilityResult {
    let master = MasterProofBundle {
        symbol: symbol.as_str().to_string(),
        checked_at: now,
        venue_bundles: bundles,
    };
    AssetEligibilityResult::from_master(master, venue_errors)
}

/// Best (maximum) VADR across every venue checked, `0.0` if none checked.
/// The gate cascade's VADR input is read off the eligibility result as a
/// whole, not a single venue in isolation (spec.md §4.6).
pub fn best_vadr(result: &AssetEligibilityResult) -> f64 {
    result
        .master
        .venue_bundles
        .iter()
        .map(|b| b.vadr_proof.actual)
        .fold(0.0, f64::max)
}

use cryptorun_schemas::{Operator, ReasonCode, ValidationProof};

use crate::config::GateConfig;
use crate::inputs::GateInputs;

fn manual_proof(
    metric: impl Into<String>,
    actual: f64,
    operator: Operator,
    required: f64,
    passed: bool,
    evidence: String,
) -> ValidationProof {
    ValidationProof {
        metric: metric.into(),
        actual,
        required,
        operator,
        passed,
        evidence,
    }
}

fn check_score(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    (
        ReasonCode::ScoreLow,
        ValidationProof::evaluate("final_with_social", inp.final_with_social, Operator::Ge, cfg.min_score),
    )
}

fn check_vadr(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    (
        ReasonCode::VadrFail,
        ValidationProof::evaluate("vadr", inp.vadr, Operator::Ge, cfg.min_vadr),
    )
}

/// Magnitude >= threshold, sign-consistent with price-vs-VWAP, enough
/// venues, and fresh enough (spec.md §4.6). These four sub-conditions
/// combine into one proof since the gate publishes a single pass/fail per
/// check; `evidence` names which sub-condition(s) failed.
fn check_funding_divergence(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    let z = inp.funding_zscore;
    let magnitude_ok = z.abs() >= cfg.min_zscore_magnitude;
    let sign_consistent = (z <= -cfg.min_zscore_magnitude && inp.price_to_vwap >= cfg.price_vwap_t)
        || (z >= cfg.min_zscore_magnitude && inp.price_to_vwap <= 2.0 - cfg.price_vwap_t);
    let venues_ok = inp.funding_venues_count >= cfg.min_venues_required;
    let fresh_ok = inp.funding_freshness_hours <= cfg.max_funding_age_hours;

    let passed = magnitude_ok && sign_consistent && venues_ok && fresh_ok;
    let evidence = format!(
        "funding_zscore={z:.3} price_to_vwap={:.4} venues={} freshness_h={:.2} -> magnitude_ok={magnitude_ok} sign_consistent={sign_consistent} venues_ok={venues_ok} fresh_ok={fresh_ok}",
        inp.price_to_vwap, inp.funding_venues_count, inp.funding_freshness_hours,
    );

    (
        ReasonCode::FundingDivergenceAbsent,
        manual_proof(
            "funding_zscore_magnitude",
            z.abs(),
            Operator::Ge,
            cfg.min_zscore_magnitude,
            passed,
            evidence,
        ),
    )
}

fn check_freshness(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    (
        ReasonCode::FreshnessFail,
        ValidationProof::evaluate("bar_age_bars", inp.bar_age_bars, Operator::Le, cfg.max_bar_age_bars),
    )
}

fn check_late_fill(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    let elapsed = (inp.execution_time_secs - inp.signal_time_secs) as f64;
    (
        ReasonCode::LateFill,
        ValidationProof::evaluate(
            "execution_minus_signal_secs",
            elapsed,
            Operator::Le,
            cfg.max_late_fill_seconds as f64,
        ),
    )
}

fn check_atr_proximity(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    let required = cfg.atr_proximity_multiple * inp.atr_current;
    (
        ReasonCode::AtrProximityFail,
        ValidationProof::evaluate("atr_distance", inp.atr_distance, Operator::Le, required),
    )
}

fn check_microstructure(inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    let actual = if inp.microstructure_passed { 1.0 } else { 0.0 };
    (
        ReasonCode::MicrostructureFail,
        manual_proof(
            "microstructure_passed",
            actual,
            Operator::Eq,
            1.0,
            inp.microstructure_passed,
            format!("microstructure validator passed={}", inp.microstructure_passed),
        ),
    )
}

/// Fails when momentum is hot AND RSI is overbought together (spec.md
/// §4.6): `momentum_24h > 12% AND RSI_4h > 70`. Either alone is fine.
fn check_fatigue(cfg: &GateConfig, inp: &GateInputs) -> (ReasonCode, ValidationProof) {
    let fatigued = inp.momentum_24h_pct > cfg.fatigue_momentum_threshold_pct
        && inp.rsi_4h > cfg.fatigue_rsi_threshold;
    let evidence = format!(
        "momentum_24h_pct={:.2} rsi_4h={:.2} -> fatigued={fatigued}",
        inp.momentum_24h_pct, inp.rsi_4h,
    );
    (
        ReasonCode::FatigueBlock,
        manual_proof(
            "momentum_24h_pct",
            inp.momentum_24h_pct,
            Operator::Le,
            cfg.fatigue_momentum_threshold_pct,
            !fatigued,
            evidence,
        ),
    )
}

/// Full cascade in the declared order (spec.md §4.6): score, VADR, funding
/// divergence, freshness, late-fill, ATR proximity, microstructure,
/// fatigue. Every proof runs (no short-circuit at this layer) so the
/// returned evidence always covers all eight checks; [`cryptorun_schemas::
/// GateDecision::from_cascade`] is what picks the first failure as the
/// admission reason.
pub fn evaluate_all(cfg: &GateConfig, inp: &GateInputs) -> Vec<(ReasonCode, ValidationProof)> {
    vec![
        check_score(cfg, inp),
        check_vadr(cfg, inp),
        check_funding_divergence(cfg, inp),
        check_freshness(cfg, inp),
        check_late_fill(cfg, inp),
        check_atr_proximity(cfg, inp),
        check_microstructure(inp),
        check_fatigue(cfg, inp),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_inputs() -> GateInputs {
        GateInputs {
            final_with_social: 80.0,
            vadr: 2.0,
            funding_zscore: -2.5,
            price_to_vwap: 1.1,
            funding_venues_count: 3,
            funding_freshness_hours: 1.0,
            bar_age_bars: 1.0,
            signal_time_secs: 1_000,
            execution_time_secs: 1_010,
            atr_distance: 1.0,
            atr_current: 1.0,
            microstructure_passed: true,
            momentum_24h_pct: 5.0,
            rsi_4h: 50.0,
        }
    }

    #[test]
    fn all_checks_pass_for_clean_candidate() {
        let cfg = GateConfig::default();
        let inp = passing_inputs();
        let proofs = evaluate_all(&cfg, &inp);
        assert!(proofs.iter().all(|(_, p)| p.passed), "{proofs:?}");
    }

    #[test]
    fn fatigue_requires_both_momentum_and_rsi_hot() {
        let cfg = GateConfig::default();
        let mut inp = passing_inputs();
        inp.momentum_24h_pct = 15.0;
        inp.rsi_4h = 50.0;
        let (_, proof) = check_fatigue(&cfg, &inp);
        assert!(proof.passed, "momentum alone should not trigger fatigue");

        inp.rsi_4h = 75.0;
        let (_, proof) = check_fatigue(&cfg, &inp);
        assert!(!proof.passed, "momentum + RSI together should trigger fatigue");
    }

    #[test]
    fn funding_divergence_requires_sign_consistency() {
        let cfg = GateConfig::default();
        let mut inp = passing_inputs();
        // Magnitude and venues/freshness OK, but price/vwap sign is wrong.
        inp.funding_zscore = -2.5;
        inp.price_to_vwap = 0.5;
        let (_, proof) = check_funding_divergence(&cfg, &inp);
        assert!(!proof.passed);
    }

    #[test]
    fn funding_divergence_requires_enough_venues() {
        let cfg = GateConfig::default();
        let mut inp = passing_inputs();
        inp.funding_venues_count = 1;
        let (_, proof) = check_funding_divergence(&cfg, &inp);
        assert!(!proof.passed);
    }

    #[test]
    fn late_fill_measures_signal_to_execution_gap() {
        let cfg = GateConfig::default();
        let mut inp = passing_inputs();
        inp.execution_time_secs = inp.signal_time_secs + 31;
        let (_, proof) = check_late_fill(&cfg, &inp);
        assert!(!proof.passed);
    }
}

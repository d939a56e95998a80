use cryptorun_orthogonalize::orthogonalize;
use cryptorun_schemas::{CompositeScore, FactorBundle, ScoreContribution, Symbol, WeightPreset};

use crate::config::SupplyDemandSplit;
use crate::error::ScoringError;

/// Cross-sectional composite scoring pipeline (spec.md §4.5): build raw
/// factor columns across the universe, orthogonalize with `momentum_core`
/// protected, apply regime weights, cap and add the social residual. Social
/// is never orthogonalized and never enters `internal` (spec.md §4.5 step 2).
///
/// Determinism: iterates `bundles` in the caller's given order and performs
/// no time-of-day-dependent work, so identical inputs always produce
/// identical output (spec.md §4.5, §8 property 2).
pub fn score_universe(
    bundles: &[(Symbol, FactorBundle)],
    weights: &WeightPreset,
    split: SupplyDemandSplit,
) -> Result<Vec<(Symbol, CompositeScore)>, ScoringError> {
    if bundles.is_empty() {
        return Err(ScoringError::EmptyUniverse);
    }

    let momentum: Vec<f64> = bundles.iter().map(|(_, b)| b.momentum_core).collect();
    let technical: Vec<f64> = bundles.iter().map(|(_, b)| b.technical).collect();
    let volume: Vec<f64> = bundles.iter().map(|(_, b)| b.volume).collect();
    let quality: Vec<f64> = bundles.iter().map(|(_, b)| b.quality).collect();

    let residuals = orthogonalize(&[momentum, technical, volume, quality])?;

    let w_momentum = weights.weight("momentum");
    let w_technical = weights.weight("technical_resid");
    let w_supply_demand = weights.weight("supply_demand");
    let w_volume = w_supply_demand * split.w_vol;
    let w_quality = w_supply_demand * split.w_qual;

    let mut out = Vec::with_capacity(bundles.len());
    for (i, (symbol, bundle)) in bundles.iter().enumerate() {
        let r_momentum = residuals[0][i];
        let r_technical = residuals[1][i];
        let r_volume = residuals[2][i];
        let r_quality = residuals[3][i];

        let momentum_contrib = w_momentum * r_momentum;
        let technical_contrib = w_technical * r_technical;
        let volume_contrib = w_volume * r_volume;
        let quality_contrib = w_quality * r_quality;

        let internal =
            (momentum_contrib + technical_contrib + volume_contrib + quality_contrib).clamp(0.0, 100.0);

        let social_resid = ((bundle.social + bundle.brand) / 2.0).clamp(0.0, 10.0);
        let final_with_social = (internal + social_resid).clamp(0.0, 110.0);

        let contributions = vec![
            ScoreContribution {
                factor: "momentum".to_string(),
                weight: w_momentum,
                residual_value: r_momentum,
                contribution: momentum_contrib,
            },
            ScoreContribution {
                factor: "technical_resid".to_string(),
                weight: w_technical,
                residual_value: r_technical,
                contribution: technical_contrib,
            },
            ScoreContribution {
                factor: "volume_resid".to_string(),
                weight: w_volume,
                residual_value: r_volume,
                contribution: volume_contrib,
            },
            ScoreContribution {
                factor: "quality_resid".to_string(),
                weight: w_quality,
                residual_value: r_quality,
                contribution: quality_contrib,
            },
        ];

        out.push((
            symbol.clone(),
            CompositeScore {
                internal,
                social_resid,
                final_with_social,
                contributions,
                regime: weights.regime,
            },
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptorun_schemas::{MovementGate, Regime, Symbol};
    use std::collections::BTreeMap;

    fn sym(s: &str) -> Symbol {
        Symbol::try_new(s).unwrap()
    }

    fn bundle(momentum: f64, technical: f64, volume: f64, quality: f64, social: f64, brand: f64) -> FactorBundle {
        FactorBundle {
            momentum_core: momentum,
            technical,
            volume,
            quality,
            social,
            brand,
        }
    }

    fn preset() -> WeightPreset {
        let mut weights = BTreeMap::new();
        weights.insert("momentum".to_string(), 0.5);
        weights.insert("technical_resid".to_string(), 0.2);
        weights.insert("supply_demand".to_string(), 0.2);
        weights.insert("weekly_carry".to_string(), 0.1);
        WeightPreset {
            regime: Regime::TrendingBull,
            weights,
            movement_gate: MovementGate {
                min_move_pct: 3.0,
                window_hours: 24,
                volume_surge_required: false,
                tightened_thresholds: false,
            },
        }
    }

    fn universe() -> Vec<(Symbol, FactorBundle)> {
        vec![
            (sym("BTCUSD"), bundle(80.0, 60.0, 50.0, 70.0, 20.0, 10.0)),
            (sym("ETHUSD"), bundle(70.0, 55.0, 45.0, 65.0, 5.0, 5.0)),
            (sym("SOLUSD"), bundle(90.0, 40.0, 60.0, 55.0, 30.0, 20.0)),
        ]
    }

    #[test]
    fn momentum_residual_equals_raw_value_protected_base() {
        let results = score_universe(&universe(), &preset(), SupplyDemandSplit::default()).unwrap();
        let bundles = universe();
        for ((_, score), (_, bundle)) in results.iter().zip(bundles.iter()) {
            let momentum_contribution = score
                .contributions
                .iter()
                .find(|c| c.factor == "momentum")
                .unwrap();
            assert!((momentum_contribution.residual_value - bundle.momentum_core).abs() < 1e-9);
        }
    }

    #[test]
    fn social_resid_is_capped_at_ten() {
        let mut universe = universe();
        universe[0].1.social = 50.0;
        universe[0].1.brand = 50.0;
        let results = score_universe(&universe, &preset(), SupplyDemandSplit::default()).unwrap();
        assert_eq!(results[0].1.social_resid, 10.0);
    }

    #[test]
    fn composite_score_invariant_holds() {
        let results = score_universe(&universe(), &preset(), SupplyDemandSplit::default()).unwrap();
        for (_, score) in &results {
            assert!(score.invariant_holds(1e-9));
        }
    }

    #[test]
    fn scoring_is_deterministic_across_repeated_calls() {
        let a = score_universe(&universe(), &preset(), SupplyDemandSplit::default()).unwrap();
        let b = score_universe(&universe(), &preset(), SupplyDemandSplit::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_universe_is_rejected() {
        let err = score_universe(&[], &preset(), SupplyDemandSplit::default()).unwrap_err();
        assert_eq!(err, ScoringError::EmptyUniverse);
    }

    #[test]
    fn internal_score_stays_within_working_scale() {
        let results = score_universe(&universe(), &preset(), SupplyDemandSplit::default()).unwrap();
        for (_, score) in &results {
            assert!((0.0..=100.0).contains(&score.internal));
            assert!((0.0..=110.0).contains(&score.final_with_social));
        }
    }
}

use std::collections::BTreeMap;

use cryptorun_schemas::{MovementGate, Regime, WeightPreset};
use tokio::sync::RwLock;

fn preset(regime: Regime, weights: &[(&str, f64)], gate: MovementGate) -> WeightPreset {
    WeightPreset {
        regime,
        weights: weights.iter().map(|&(k, v)| (k.to_string(), v)).collect(),
        movement_gate: gate,
    }
}

/// Default per-regime weight shapes (spec.md §4.3). `TrendingBull` emphasizes
/// momentum and allows a weekly-carry factor; `Choppy` zero-weights weekly
/// carry and tightens volume surge; `HighVol` leans on quality/supply-demand
/// and requires volume confirmation.
pub fn default_preset(regime: Regime) -> WeightPreset {
    match regime {
        Regime::TrendingBull => preset(
            regime,
            &[
                ("momentum", 0.50),
                ("technical_resid", 0.20),
                ("supply_demand", 0.20),
                ("weekly_carry", 0.10),
            ],
            MovementGate {
                min_move_pct: 3.0,
                window_hours: 24,
                volume_surge_required: false,
                tightened_thresholds: false,
            },
        ),
        Regime::Choppy => preset(
            regime,
            &[
                ("momentum", 0.30),
                ("technical_resid", 0.35),
                ("supply_demand", 0.35),
                ("weekly_carry", 0.0),
            ],
            MovementGate {
                min_move_pct: 5.0,
                window_hours: 24,
                volume_surge_required: true,
                tightened_thresholds: true,
            },
        ),
        Regime::HighVol => preset(
            regime,
            &[
                ("momentum", 0.28),
                ("technical_resid", 0.33),
                ("supply_demand", 0.39),
                ("weekly_carry", 0.0),
            ],
            MovementGate {
                min_move_pct: 6.0,
                window_hours: 48,
                volume_surge_required: true,
                tightened_thresholds: true,
            },
        ),
    }
}

/// Owns the active [`WeightPreset`] and switches it atomically on a regime
/// transition. Presets are supplied at construction (defaults, or a
/// config-overlaid set) so the manager never hardcodes the weight shapes
/// itself.
#[derive(Debug)]
pub struct WeightManager {
    presets: BTreeMap<String, WeightPreset>,
    current: RwLock<Regime>,
}

impl WeightManager {
    /// Builds a manager from the three built-in default presets.
    pub fn with_defaults(initial: Regime) -> Self {
        let presets = [Regime::TrendingBull, Regime::Choppy, Regime::HighVol]
            .into_iter()
            .map(|r| (r.as_str().to_string(), default_preset(r)))
            .collect();
        Self {
            presets,
            current: RwLock::new(initial),
        }
    }

    /// Builds a manager from caller-supplied presets (e.g. config-overlaid).
    /// Every [`Regime`] variant must have an entry or construction panics —
    /// a missing preset is a config error the caller should have caught
    /// before reaching here.
    pub fn with_presets(initial: Regime, presets: Vec<WeightPreset>) -> Self {
        let map: BTreeMap<String, WeightPreset> = presets
            .into_iter()
            .map(|p| (p.regime.as_str().to_string(), p))
            .collect();
        for r in [Regime::TrendingBull, Regime::Choppy, Regime::HighVol] {
            assert!(
                map.contains_key(r.as_str()),
                "missing weight preset for regime '{r}'"
            );
        }
        Self {
            presets: map,
            current: RwLock::new(initial),
        }
    }

    pub fn preset_for(&self, regime: Regime) -> &WeightPreset {
        self.presets
            .get(regime.as_str())
            .expect("every regime has a preset by construction")
    }

    pub async fn current_regime(&self) -> Regime {
        *self.current.read().await
    }

    pub async fn current_preset(&self) -> &WeightPreset {
        let regime = *self.current.read().await;
        self.preset_for(regime)
    }

    /// Atomically switches the active preset on a regime transition.
    pub async fn switch_to(&self, regime: Regime) {
        *self.current.write().await = regime;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_preset_has_valid_weight_sum() {
        for r in [Regime::TrendingBull, Regime::Choppy, Regime::HighVol] {
            let p = default_preset(r);
            assert!(p.weights_valid(), "{r} weight sum = {}", p.weight_sum());
        }
    }

    #[test]
    fn trending_bull_allows_weekly_carry_choppy_and_high_vol_zero_it() {
        assert!(default_preset(Regime::TrendingBull).weight("weekly_carry") > 0.0);
        assert_eq!(default_preset(Regime::Choppy).weight("weekly_carry"), 0.0);
        assert_eq!(default_preset(Regime::HighVol).weight("weekly_carry"), 0.0);
    }

    #[tokio::test]
    async fn switch_to_updates_current_preset() {
        let mgr = WeightManager::with_defaults(Regime::Choppy);
        assert_eq!(mgr.current_regime().await, Regime::Choppy);
        mgr.switch_to(Regime::HighVol).await;
        assert_eq!(mgr.current_regime().await, Regime::HighVol);
        assert_eq!(mgr.current_preset().await.regime, Regime::HighVol);
    }
}

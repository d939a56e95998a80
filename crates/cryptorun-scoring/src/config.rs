/// Caller-supplied split of the `supply_demand` weight bucket between the
/// volume and quality residuals (spec.md §4.5 step 3: `w_supply_demand *
/// (w_vol * R_volume + w_qual * R_quality)`).
///
/// This is intentionally separate from [`cryptorun_schemas::WeightPreset`]:
/// that struct's `weight_sum()` invariant (spec.md §4.3, §8 property 4)
/// is checked over the four top-level weights only (`momentum`,
/// `technical_resid`, `supply_demand`, `weekly_carry`); folding a volume/
/// quality sub-split into the same map would require excluding two of its
/// own keys from that sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplyDemandSplit {
    pub w_vol: f64,
    pub w_qual: f64,
}

impl Default for SupplyDemandSplit {
    fn default() -> Self {
        Self {
            w_vol: 0.5,
            w_qual: 0.5,
        }
    }
}

impl SupplyDemandSplit {
    pub fn is_valid(&self) -> bool {
        (self.w_vol + self.w_qual - 1.0).abs() < 1e-6
    }
}

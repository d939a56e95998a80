use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discrete market mode selected by a 4h majority vote (spec.md §4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    TrendingBull,
    Choppy,
    HighVol,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::TrendingBull => "trending_bull",
            Regime::Choppy => "choppy",
            Regime::HighVol => "high_vol",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vote cast by a detector signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    TrendingBull,
    Choppy,
    HighVol,
}

/// A single regime transition, appended to an audit-only change history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimeChange {
    pub from: Option<Regime>,
    pub to: Regime,
    /// Source-clock timestamp (epoch seconds) of the transition.
    pub at: i64,
    pub confidence: f64,
}

/// Process-resident regime state (spec.md §3).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimeState {
    pub regime: Regime,
    pub confidence: f64,
    pub last_update: i64,
    pub next_update: i64,
    /// True iff no regime change occurred in the last two cycles.
    pub is_stable: bool,
    pub signals: BTreeMap<String, f64>,
    /// Per-regime vote counts from the most recent detection.
    pub voting_breakdown: BTreeMap<String, u8>,
    pub history: Vec<RegimeChange>,
    /// Cycles elapsed since the most recent transition in `history`. Not
    /// `history.len()`-derived: history only grows on change, so this is
    /// the counter `is_stable` actually needs ("no change in the last two
    /// cycles", not "history has fewer than two entries ever").
    cycles_since_change: u32,
}

impl RegimeState {
    pub fn initial(regime: Regime, at: i64, cadence_secs: i64) -> Self {
        Self {
            regime,
            confidence: 1.0,
            last_update: at,
            next_update: at + cadence_secs,
            is_stable: true,
            signals: BTreeMap::new(),
            voting_breakdown: BTreeMap::new(),
            history: Vec::new(),
            cycles_since_change: u32::MAX,
        }
    }

    /// `is_stable` per spec.md §3: no change in the last two cycles.
    /// `changed` is whether this cycle's vote produced a new regime;
    /// the caller (the stateful detector) is the only one that knows that.
    pub fn recompute_is_stable(&mut self, changed: bool) {
        self.cycles_since_change = if changed {
            0
        } else {
            self.cycles_since_change.saturating_add(1)
        };
        self.is_stable = self.cycles_since_change >= 2;
    }
}

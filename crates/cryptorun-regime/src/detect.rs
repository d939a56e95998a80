use std::collections::BTreeMap;

use cryptorun_schemas::{Regime, RegimeChange, RegimeState, Vote};

/// Raw detector-input readings for one vote cycle (spec.md §4.3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeSignals {
    pub realized_vol_7d: f64,
    pub breadth_above_20ma: f64,
    pub breadth_thrust_adx_proxy: f64,
}

/// Each signal casts exactly one vote among the three regimes `Vote` can
/// express. Signal 1 has no "low vol" regime to vote for directly, so a
/// below-threshold reading casts `Choppy` — a neutral default rather than
/// an affirmative claim about trend direction.
pub fn cast_votes(signals: &RegimeSignals) -> [Vote; 3] {
    let v1 = if signals.realized_vol_7d > 0.25 {
        Vote::HighVol
    } else {
        Vote::Choppy
    };
    let v2 = if signals.breadth_above_20ma > 0.60 {
        Vote::TrendingBull
    } else {
        Vote::Choppy
    };
    let v3 = if signals.breadth_thrust_adx_proxy > 0.70 {
        Vote::TrendingBull
    } else {
        Vote::Choppy
    };
    [v1, v2, v3]
}

fn vote_to_regime(v: Vote) -> Regime {
    match v {
        Vote::TrendingBull => Regime::TrendingBull,
        Vote::Choppy => Regime::Choppy,
        Vote::HighVol => Regime::HighVol,
    }
}

/// Majority of 3 votes; a 1-1-1 tie defaults to `Choppy` (spec.md §4.3).
/// Returns the winning regime, its confidence (`maxVotes / 3`), and the
/// per-regime vote tally.
pub fn decide(signals: &RegimeSignals) -> (Regime, f64, BTreeMap<String, u8>) {
    let votes = cast_votes(signals);

    let mut tally: BTreeMap<Regime, u8> = BTreeMap::new();
    for v in votes {
        *tally.entry(vote_to_regime(v)).or_insert(0) += 1;
    }

    let max_votes = tally.values().copied().max().unwrap_or(0);
    let leaders: Vec<Regime> = tally
        .iter()
        .filter(|(_, &count)| count == max_votes)
        .map(|(&r, _)| r)
        .collect();

    let winner = if leaders.len() == 1 {
        leaders[0]
    } else {
        Regime::Choppy
    };

    let confidence = max_votes as f64 / 3.0;

    let breakdown = [Regime::TrendingBull, Regime::Choppy, Regime::HighVol]
        .into_iter()
        .map(|r| (r.as_str().to_string(), tally.get(&r).copied().unwrap_or(0)))
        .collect();

    (winner, confidence, breakdown)
}

/// Applies a `decide()` outcome to `state`, appending a [`RegimeChange`]
/// only when the winning regime differs from the current one, and
/// refreshing `is_stable` and the cadence window.
pub fn apply_decision(
    state: &mut RegimeState,
    winner: Regime,
    confidence: f64,
    breakdown: BTreeMap<String, u8>,
    signals: &RegimeSignals,
    now: i64,
    cadence_secs: i64,
) {
    let changed = winner != state.regime;
    if changed {
        state.history.push(RegimeChange {
            from: Some(state.regime),
            to: winner,
            at: now,
            confidence,
        });
        state.regime = winner;
    }

    state.confidence = confidence;
    state.last_update = now;
    state.next_update = now + cadence_secs;
    state.voting_breakdown = breakdown;
    state.signals.insert("realized_vol_7d".to_string(), signals.realized_vol_7d);
    state
        .signals
        .insert("breadth_above_20ma".to_string(), signals.breadth_above_20ma);
    state.signals.insert(
        "breadth_thrust_adx_proxy".to_string(),
        signals.breadth_thrust_adx_proxy,
    );
    state.recompute_is_stable(changed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimous_trending_bull_wins() {
        let signals = RegimeSignals {
            realized_vol_7d: 0.1,
            breadth_above_20ma: 0.9,
            breadth_thrust_adx_proxy: 0.9,
        };
        let (regime, confidence, _) = decide(&signals);
        assert_eq!(regime, Regime::TrendingBull);
        assert!((confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn high_vol_dominates_when_two_signals_agree() {
        let signals = RegimeSignals {
            realized_vol_7d: 0.5,
            breadth_above_20ma: 0.1,
            breadth_thrust_adx_proxy: 0.9,
        };
        // v1=HighVol, v2=Choppy, v3=TrendingBull -> 1-1-1 tie -> Choppy
        let (regime, _, _) = decide(&signals);
        assert_eq!(regime, Regime::Choppy);
    }

    #[test]
    fn three_way_tie_defaults_to_choppy() {
        let signals = RegimeSignals {
            realized_vol_7d: 0.5,
            breadth_above_20ma: 0.1,
            breadth_thrust_adx_proxy: 0.9,
        };
        let (regime, confidence, breakdown) = decide(&signals);
        assert_eq!(regime, Regime::Choppy);
        assert!((confidence - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(breakdown.get("trending_bull"), Some(&1));
        assert_eq!(breakdown.get("high_vol"), Some(&1));
        assert_eq!(breakdown.get("choppy"), Some(&1));
    }

    #[test]
    fn apply_decision_records_transition_only_on_change() {
        let mut state = RegimeState::initial(Regime::Choppy, 0, 14_400);
        let signals = RegimeSignals {
            realized_vol_7d: 0.1,
            breadth_above_20ma: 0.9,
            breadth_thrust_adx_proxy: 0.9,
        };
        let (winner, confidence, breakdown) = decide(&signals);
        apply_decision(&mut state, winner, confidence, breakdown, &signals, 14_400, 14_400);
        assert_eq!(state.regime, Regime::TrendingBull);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].from, Some(Regime::Choppy));
        assert!(!state.is_stable, "not stable the cycle a transition occurs");

        // One stable cycle afterwards: still within the two-cycle window.
        let (winner2, confidence2, breakdown2) = decide(&signals);
        apply_decision(
            &mut state, winner2, confidence2, breakdown2, &signals, 28_800, 14_400,
        );
        assert_eq!(state.history.len(), 1);
        assert!(!state.is_stable);

        // Second consecutive stable cycle: now outside the window.
        let (winner3, confidence3, breakdown3) = decide(&signals);
        apply_decision(
            &mut state, winner3, confidence3, breakdown3, &signals, 43_200, 14_400,
        );
        assert_eq!(state.history.len(), 1);
        assert!(state.is_stable);
    }
}

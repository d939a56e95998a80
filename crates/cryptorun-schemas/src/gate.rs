use serde::{Deserialize, Serialize};

use crate::reason::{ReasonCode, ValidationProof};

/// Outcome of the hard entry-gate cascade (C7) for one symbol at one tick
/// (spec.md §3, §4.7). `allowed` is the single admission bit; everything
/// else is evidence for why.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    pub allowed: bool,
    /// Primary reason: `Allowed` when every check passed, otherwise the
    /// first failing check in cascade order.
    pub reason: ReasonCode,

    pub score_ok: bool,
    pub vadr_ok: bool,
    pub funding_ok: bool,
    pub freshness_ok: bool,
    pub late_fill_ok: bool,
    pub atr_ok: bool,
    pub fatigue_ok: bool,
    pub microstructure_ok: bool,

    pub proofs: Vec<ValidationProof>,
}

impl GateDecision {
    /// Builds the decision from the cascade's individual proofs, short
    /// circuiting on the first failure in declared order (spec.md §4.7).
    pub fn from_cascade(proofs: Vec<(ReasonCode, ValidationProof)>) -> Self {
        let mut decision = GateDecision {
            allowed: true,
            reason: ReasonCode::Allowed,
            score_ok: true,
            vadr_ok: true,
            funding_ok: true,
            freshness_ok: true,
            late_fill_ok: true,
            atr_ok: true,
            fatigue_ok: true,
            microstructure_ok: true,
            proofs: Vec::with_capacity(proofs.len()),
        };

        let mut first_failure: Option<ReasonCode> = None;
        for (code, proof) in proofs {
            let flag = match code {
                ReasonCode::ScoreLow => &mut decision.score_ok,
                ReasonCode::VadrFail => &mut decision.vadr_ok,
                ReasonCode::FundingDivergenceAbsent => &mut decision.funding_ok,
                ReasonCode::FreshnessFail => &mut decision.freshness_ok,
                ReasonCode::LateFill => &mut decision.late_fill_ok,
                ReasonCode::AtrProximityFail => &mut decision.atr_ok,
                ReasonCode::FatigueBlock => &mut decision.fatigue_ok,
                ReasonCode::MicrostructureFail => &mut decision.microstructure_ok,
                _ => &mut decision.score_ok,
            };
            if !proof.passed {
                *flag = false;
                if first_failure.is_none() {
                    first_failure = Some(code);
                }
            }
            decision.proofs.push(proof);
        }

        if let Some(code) = first_failure {
            decision.allowed = false;
            decision.reason = code;
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Operator;

    #[test]
    fn all_pass_allows() {
        let proofs = vec![(
            ReasonCode::ScoreLow,
            ValidationProof::evaluate("final_score", 80.0, Operator::Ge, 75.0),
        )];
        let d = GateDecision::from_cascade(proofs);
        assert!(d.allowed);
        assert_eq!(d.reason, ReasonCode::Allowed);
    }

    #[test]
    fn first_failure_wins_and_short_circuits_reason() {
        let proofs = vec![
            (
                ReasonCode::ScoreLow,
                ValidationProof::evaluate("final_score", 80.0, Operator::Ge, 75.0),
            ),
            (
                ReasonCode::VadrFail,
                ValidationProof::evaluate("vadr", 1.2, Operator::Ge, 1.75),
            ),
            (
                ReasonCode::FatigueBlock,
                ValidationProof::evaluate("pct_24h", 15.0, Operator::Lt, 12.0),
            ),
        ];
        let d = GateDecision::from_cascade(proofs);
        assert!(!d.allowed);
        assert_eq!(d.reason, ReasonCode::VadrFail);
        assert!(!d.vadr_ok);
        assert!(!d.fatigue_ok);
        assert!(d.score_ok);
    }

    #[test]
    fn atr_proximity_failure_sets_atr_ok_and_leaves_score_ok_alone() {
        let proofs = vec![
            (
                ReasonCode::ScoreLow,
                ValidationProof::evaluate("final_score", 80.0, Operator::Ge, 75.0),
            ),
            (
                ReasonCode::AtrProximityFail,
                ValidationProof::evaluate("price_to_vwap", 2.0, Operator::Le, 1.0),
            ),
        ];
        let d = GateDecision::from_cascade(proofs);
        assert!(!d.allowed);
        assert_eq!(d.reason, ReasonCode::AtrProximityFail);
        assert!(!d.atr_ok);
        assert!(d.score_ok);
    }
}

use serde::{Deserialize, Serialize};

/// Tagged reason codes driving both machine logic and human evidence
/// strings (Design Note §9: "tagged variants replace string-typed
/// reasons"). The `as_code` projection preserves the exact surface
/// identifiers spec.md §6 requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    Allowed,

    // Policy (C1)
    NonUsdQuote,
    AggregatorBanned,
    StablecoinDepeg,
    GlobalPause,
    SymbolBlacklisted,
    VenueNotPreferred,
    EmergencyControl,

    // Microstructure (C2)
    SpreadWide,
    DepthLow,
    VadrFail,
    AdvLow,
    DataStale,

    // Gates (C7)
    FreshnessFail,
    LateFill,
    FatigueBlock,
    FundingDivergenceAbsent,
    ScoreLow,
    AtrProximityFail,
    MicrostructureFail,

    // Invariants / infra
    InvariantViolation,
    BadInput,
}

impl ReasonCode {
    /// The exact surface identifier from spec.md §6 (extended with a few
    /// gates the distilled vocabulary left implicit).
    pub fn as_code(&self) -> &'static str {
        match self {
            ReasonCode::Allowed => "",
            ReasonCode::NonUsdQuote => "NON_USD_QUOTE",
            ReasonCode::AggregatorBanned => "AGGREGATOR_BANNED",
            ReasonCode::StablecoinDepeg => "STABLECOIN_DEPEG",
            ReasonCode::GlobalPause => "GLOBAL_PAUSE",
            ReasonCode::SymbolBlacklisted => "SYMBOL_BLACKLISTED",
            ReasonCode::VenueNotPreferred => "VENUE_NOT_PREFERRED",
            ReasonCode::EmergencyControl => "EMERGENCY_CONTROL",
            ReasonCode::SpreadWide => "SPREAD_WIDE",
            ReasonCode::DepthLow => "DEPTH_LOW",
            ReasonCode::VadrFail => "VADR_FAIL",
            ReasonCode::AdvLow => "ADV_LOW",
            ReasonCode::DataStale => "DATA_STALE",
            ReasonCode::FreshnessFail => "FRESHNESS_FAIL",
            ReasonCode::LateFill => "LATE_FILL",
            ReasonCode::FatigueBlock => "FATIGUE_BLOCK",
            ReasonCode::FundingDivergenceAbsent => "FUNDING_DIVERGENCE_ABSENT",
            ReasonCode::ScoreLow => "SCORE_LOW",
            ReasonCode::AtrProximityFail => "ATR_PROXIMITY_FAIL",
            ReasonCode::MicrostructureFail => "MICROSTRUCTURE_FAIL",
            ReasonCode::InvariantViolation => "INVARIANT_VIOLATION",
            ReasonCode::BadInput => "BAD_INPUT",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Comparison operator used in a [`ValidationProof`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
        }
    }

    pub fn holds(&self, actual: f64, required: f64) -> bool {
        match self {
            Operator::Lt => actual < required,
            Operator::Le => actual <= required,
            Operator::Gt => actual > required,
            Operator::Ge => actual >= required,
            Operator::Eq => (actual - required).abs() < 1e-9,
        }
    }
}

/// One structured gate/check outcome: metric, actual, required, operator,
/// pass flag, and a human evidence string (spec.md §4.6).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationProof {
    pub metric: String,
    pub actual: f64,
    pub required: f64,
    pub operator: Operator,
    pub passed: bool,
    pub evidence: String,
}

impl ValidationProof {
    pub fn evaluate(metric: impl Into<String>, actual: f64, operator: Operator, required: f64) -> Self {
        let metric = metric.into();
        let passed = operator.holds(actual, required);
        let evidence = format!(
            "{metric}={actual:.6} required {op} {required:.6} -> {status}",
            op = operator.as_str(),
            status = if passed { "PASS" } else { "FAIL" },
        );
        Self {
            metric,
            actual,
            required,
            operator,
            passed,
            evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_preserve_surface_vocabulary() {
        assert_eq!(ReasonCode::NonUsdQuote.as_code(), "NON_USD_QUOTE");
        assert_eq!(ReasonCode::AggregatorBanned.as_code(), "AGGREGATOR_BANNED");
        assert_eq!(ReasonCode::StablecoinDepeg.as_code(), "STABLECOIN_DEPEG");
        assert_eq!(ReasonCode::GlobalPause.as_code(), "GLOBAL_PAUSE");
        assert_eq!(ReasonCode::SymbolBlacklisted.as_code(), "SYMBOL_BLACKLISTED");
        assert_eq!(ReasonCode::VenueNotPreferred.as_code(), "VENUE_NOT_PREFERRED");
        assert_eq!(ReasonCode::EmergencyControl.as_code(), "EMERGENCY_CONTROL");
        assert_eq!(ReasonCode::SpreadWide.as_code(), "SPREAD_WIDE");
        assert_eq!(ReasonCode::DepthLow.as_code(), "DEPTH_LOW");
        assert_eq!(ReasonCode::VadrFail.as_code(), "VADR_FAIL");
        assert_eq!(ReasonCode::AdvLow.as_code(), "ADV_LOW");
        assert_eq!(ReasonCode::FreshnessFail.as_code(), "FRESHNESS_FAIL");
        assert_eq!(ReasonCode::DataStale.as_code(), "DATA_STALE");
        assert_eq!(ReasonCode::LateFill.as_code(), "LATE_FILL");
        assert_eq!(ReasonCode::FatigueBlock.as_code(), "FATIGUE_BLOCK");
        assert_eq!(
            ReasonCode::FundingDivergenceAbsent.as_code(),
            "FUNDING_DIVERGENCE_ABSENT"
        );
        assert_eq!(ReasonCode::ScoreLow.as_code(), "SCORE_LOW");
    }

    #[test]
    fn operator_holds_matches_semantics() {
        assert!(Operator::Lt.holds(1.0, 2.0));
        assert!(!Operator::Lt.holds(2.0, 2.0));
        assert!(Operator::Ge.holds(2.0, 2.0));
        assert!(Operator::Eq.holds(2.0000000001, 2.0));
    }

    #[test]
    fn validation_proof_evidence_reflects_pass_fail() {
        let p = ValidationProof::evaluate("spread_bps", 25.0, Operator::Lt, 50.0);
        assert!(p.passed);
        assert!(p.evidence.contains("PASS"));

        let f = ValidationProof::evaluate("spread_bps", 80.0, Operator::Lt, 50.0);
        assert!(!f.passed);
        assert!(f.evidence.contains("FAIL"));
    }
}

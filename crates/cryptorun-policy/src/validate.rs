use cryptorun_schemas::{is_well_formed_usd_quote, DataSource, DataType, ReasonCode, Venue};

use crate::manager::PolicySnapshot;

/// A single policy check failure. Pure data: the orchestrator marks the
/// candidate rejected with `code`, never retries locally (spec.md §4.1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ReasonCode,
    pub evidence: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_code(), self.evidence)
    }
}

impl std::error::Error for ValidationError {}

fn err(code: ReasonCode, evidence: impl Into<String>) -> ValidationError {
    ValidationError {
        code,
        evidence: evidence.into(),
    }
}

const STABLECOIN_PREFIXES: &[&str] = &["USDT", "USDC", "BUSD", "DAI", "TUSD", "USDD", "FRAX"];
const DEPEG_TOLERANCE: f64 = 0.005;

/// `ValidateUSDOnly`: fails `NON_USD_QUOTE` unless `raw` ends in `USD`
/// (case-insensitive).
pub fn validate_usd_only(raw: &str) -> Result<(), ValidationError> {
    if is_well_formed_usd_quote(raw) {
        Ok(())
    } else {
        Err(err(
            ReasonCode::NonUsdQuote,
            format!("'{raw}' is not a well-formed USD quote symbol"),
        ))
    }
}

/// `ValidateVenuePreference`: preference order kraken -> binance -> okx ->
/// coinbase. Fails `VENUE_NOT_PREFERRED` when `venue` is absent, or present
/// but not the primary venue with fallback disabled.
pub fn validate_venue_preference(
    venue: Option<Venue>,
    allow_fallback: bool,
) -> Result<(), ValidationError> {
    match venue {
        None => Err(err(ReasonCode::VenueNotPreferred, "no venue available")),
        Some(v) if v == Venue::PREFERENCE_ORDER[0] => Ok(()),
        Some(v) if allow_fallback => {
            let _ = v.preference_rank();
            Ok(())
        }
        Some(v) => Err(err(
            ReasonCode::VenueNotPreferred,
            format!("venue '{v}' is not primary and fallback is disabled"),
        )),
    }
}

/// `ValidateAggregatorBan`: fails `AGGREGATOR_BANNED` iff `data_source` is a
/// banned aggregator AND `data_type` is a microstructure type.
/// Non-microstructure uses of aggregators are permitted.
pub fn validate_aggregator_ban(
    data_source: &DataSource,
    data_type: DataType,
) -> Result<(), ValidationError> {
    if data_type.is_microstructure() && data_source.is_banned_aggregator() {
        Err(err(
            ReasonCode::AggregatorBanned,
            format!("source '{}' banned for microstructure data", data_source.as_str()),
        ))
    } else {
        Ok(())
    }
}

/// `ValidateStablecoinDepeg`: for a recognized stablecoin prefix, fails
/// `STABLECOIN_DEPEG` when `|price - 1| > 0.005`.
pub fn validate_stablecoin_depeg(symbol_raw: &str, price: f64) -> Result<(), ValidationError> {
    let upper = symbol_raw.to_ascii_uppercase();
    let is_stable = STABLECOIN_PREFIXES.iter().any(|p| upper.starts_with(p));
    if !is_stable {
        return Ok(());
    }
    let deviation = (price - 1.0).abs();
    if deviation > DEPEG_TOLERANCE {
        Err(err(
            ReasonCode::StablecoinDepeg,
            format!("price={price:.6} deviates {deviation:.6} from peg (tolerance {DEPEG_TOLERANCE})"),
        ))
    } else {
        Ok(())
    }
}

/// `ValidateEmergencyControls`: global pause, symbol blacklist, or a
/// per-(symbol, venue) emergency flag each map to a distinct reason code.
pub fn validate_emergency_controls(
    snapshot: &PolicySnapshot,
    symbol_raw: &str,
    venue: Option<Venue>,
) -> Result<(), ValidationError> {
    if snapshot.paused {
        return Err(err(ReasonCode::GlobalPause, "global pause is active"));
    }
    let upper = symbol_raw.to_ascii_uppercase();
    if snapshot.blacklist.contains(&upper) {
        return Err(err(
            ReasonCode::SymbolBlacklisted,
            format!("'{upper}' is blacklisted"),
        ));
    }
    if let Some(v) = venue {
        if snapshot
            .emergency_flags
            .get(&(upper.clone(), v))
            .copied()
            .unwrap_or(false)
        {
            return Err(err(
                ReasonCode::EmergencyControl,
                format!("emergency control active for '{upper}' on venue '{v}'"),
            ));
        }
    }
    Ok(())
}

/// Bundled inputs for [`validate_all`].
pub struct ValidateAllInput<'a> {
    pub symbol_raw: &'a str,
    pub venue: Option<Venue>,
    pub allow_fallback: bool,
    pub data_source: &'a DataSource,
    pub data_type: DataType,
    pub price: f64,
}

/// `ValidateAll`: runs every check in fixed order, short-circuiting on the
/// first failure: emergency -> USD -> venue (fallback allowed) -> aggregator
/// -> depeg (spec.md §4.1).
pub fn validate_all(
    snapshot: &PolicySnapshot,
    input: &ValidateAllInput<'_>,
) -> Result<(), ValidationError> {
    validate_emergency_controls(snapshot, input.symbol_raw, input.venue)?;
    validate_usd_only(input.symbol_raw)?;
    validate_venue_preference(input.venue, input.allow_fallback)?;
    validate_aggregator_ban(input.data_source, input.data_type)?;
    validate_stablecoin_depeg(input.symbol_raw, input.price)?;
    Ok(())
}

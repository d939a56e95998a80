use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A USD spot symbol: ASCII, uppercase, matching `^[A-Z0-9]+USD$`.
///
/// Construction is the single source of truth for the symbol-shape
/// invariant; policy's `ValidateUSDOnly` re-checks raw (possibly
/// lowercase, possibly malformed) strings *before* a `Symbol` exists, using
/// [`is_well_formed_usd_quote`] so both call sites share one definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

// Serializes as its plain string form and re-validates on the way back in,
// so a `Symbol` read from an artifact or fixture file can never bypass
// `try_new`'s shape check.
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Symbol::try_new(&raw).map_err(|e| de::Error::custom(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolError {
    pub raw: String,
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a well-formed USD quote symbol: '{}'", self.raw)
    }
}

impl std::error::Error for SymbolError {}

/// Case-insensitive shape check: ASCII alphanumeric, ending in `USD`, with at
/// least one character before the suffix.
pub fn is_well_formed_usd_quote(raw: &str) -> bool {
    if raw.len() < 4 {
        return false;
    }
    if !raw.is_ascii() {
        return false;
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let upper = raw.to_ascii_uppercase();
    upper.ends_with("USD") && upper.len() > 3
}

impl Symbol {
    /// Parse and upper-case a raw candidate. Fails unless
    /// [`is_well_formed_usd_quote`] accepts it.
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self, SymbolError> {
        let raw = raw.as_ref();
        if !is_well_formed_usd_quote(raw) {
            return Err(SymbolError {
                raw: raw.to_string(),
            });
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The non-USD base asset, e.g. `BTC` for `BTCUSD`.
    pub fn base(&self) -> &str {
        &self.0[..self.0.len() - 3]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::{Deserialize, Serialize};

/// Closed set of exchange-native venues this system will trade on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Kraken,
    Binance,
    Okx,
    Coinbase,
}

impl Venue {
    /// Preference order: kraken -> binance -> okx -> coinbase.
    pub const PREFERENCE_ORDER: [Venue; 4] =
        [Venue::Kraken, Venue::Binance, Venue::Okx, Venue::Coinbase];

    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Kraken => "kraken",
            Venue::Binance => "binance",
            Venue::Okx => "okx",
            Venue::Coinbase => "coinbase",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kraken" => Some(Venue::Kraken),
            "binance" => Some(Venue::Binance),
            "okx" => Some(Venue::Okx),
            "coinbase" => Some(Venue::Coinbase),
            _ => None,
        }
    }

    pub fn preference_rank(&self) -> usize {
        Self::PREFERENCE_ORDER
            .iter()
            .position(|v| v == self)
            .unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data source tag, which may or may not be an exchange-native [`Venue`].
/// Aggregators appear only here, never as a `Venue`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataSource(String);

impl DataSource {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_banned_aggregator(&self) -> bool {
        BANNED_AGGREGATORS.contains(&self.0.as_str())
    }
}

impl From<Venue> for DataSource {
    fn from(v: Venue) -> Self {
        DataSource::new(v.as_str())
    }
}

/// Closed default list of aggregator sources banned for microstructure data
/// types. Configurable overlay lives in `cryptorun-config`; this is the
/// built-in default set referenced by spec.md §3.
pub const BANNED_AGGREGATORS: &[&str] = &[
    "dexscreener",
    "coingecko",
    "cmc",
    "paprika",
    "etherscan",
    "moralis",
];

/// Data types for which aggregator sources are forbidden (microstructure
/// types, per spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Depth,
    Spread,
    OrderBook,
    L1,
    L2,
    Trades,
    Ticker,
    /// Catch-all for non-microstructure uses (price data, market cap, etc.)
    /// that aggregators remain permitted for.
    Other,
}

impl DataType {
    pub fn is_microstructure(&self) -> bool {
        !matches!(self, DataType::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_order_is_kraken_first() {
        assert_eq!(Venue::Kraken.preference_rank(), 0);
        assert_eq!(Venue::Coinbase.preference_rank(), 3);
    }

    #[test]
    fn banned_aggregator_detected_case_insensitively() {
        let ds = DataSource::new("CoinGecko");
        assert!(ds.is_banned_aggregator());
        let venue_ds: DataSource = Venue::Kraken.into();
        assert!(!venue_ds.is_banned_aggregator());
    }

    #[test]
    fn data_type_microstructure_classification() {
        assert!(DataType::Depth.is_microstructure());
        assert!(DataType::Ticker.is_microstructure());
        assert!(!DataType::Other.is_microstructure());
    }
}

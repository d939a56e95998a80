use async_trait::async_trait;
use cryptorun_schemas::{L1Snapshot, L2Snapshot, Symbol};

use crate::error::VenueError;

/// Top-of-book + last-trade summary, distinct from [`L1Snapshot`] in that it
/// also carries 24h volume/change the way a venue ticker endpoint reports it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ticker {
    pub symbol: Symbol,
    pub last: f64,
    pub volume_24h_base: f64,
    pub high_24h: f64,
    pub low_24h: f64,
}

/// One funding-rate observation for a venue/symbol pair (spec.md §4.6
/// "Funding divergence").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FundingPoint {
    pub timestamp: i64,
    pub rate: f64,
    pub volume_weighted_price: f64,
}

/// Exchange-native market-data capability. `cryptorun-microstructure` and
/// `cryptorun-gates` consume its outputs; they never call a venue directly.
#[async_trait]
pub trait VenueClient: Send + Sync {
    /// Identifies this client for error/evidence attribution (e.g. `"kraken"`).
    fn venue_name(&self) -> &'static str;

    /// Fetch current top-of-book and order-book depth in one call, since both
    /// are required together for microstructure validation.
    async fn fetch_order_book(
        &self,
        symbol: &Symbol,
        depth_levels: usize,
    ) -> Result<(L1Snapshot, L2Snapshot), VenueError>;

    async fn fetch_ticker(&self, symbol: &Symbol) -> Result<Ticker, VenueError>;

    /// Most recent `limit` funding observations, most recent last.
    async fn fetch_funding_history(
        &self,
        symbol: &Symbol,
        limit: usize,
    ) -> Result<Vec<FundingPoint>, VenueError>;
}

/// Regime-detector signal feed (spec.md §4.3, §6). Implementations are
/// expected to aggregate across the tradable universe; the core never reads
/// raw bars itself.
#[async_trait]
pub trait DetectorInputs: Send + Sync {
    async fn realized_volatility_7d(&self) -> Result<f64, VenueError>;

    /// Fraction of the universe trading above its 20-period moving average,
    /// in `[0, 1]`.
    async fn breadth_above_20ma(&self) -> Result<f64, VenueError>;

    /// Breadth-thrust ADX proxy, in `[0, 1]`.
    async fn breadth_thrust_adx_proxy(&self) -> Result<f64, VenueError>;

    /// Source-clock timestamp (epoch seconds) the above signals were
    /// computed as-of. The regime detector never reads the wall clock
    /// itself (spec.md §9 "no wall clock inside the engine").
    async fn timestamp(&self) -> Result<i64, VenueError>;
}

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use cryptorun_schemas::{L1Snapshot, L2Snapshot, Symbol};
use cryptorun_venue::{DetectorInputs, FundingPoint, Ticker, VenueClient, VenueError};

/// In-memory [`VenueClient`] backed by caller-seeded fixtures, standing in
/// for a real exchange adapter in tests and the CLI's default scan-runner
/// (spec.md §6: real venue connectivity is out of scope beyond the single
/// Kraken reference client).
#[derive(Debug, Default)]
pub struct FixtureVenueClient {
    name: &'static str,
    books: BTreeMap<String, (L1Snapshot, L2Snapshot)>,
    tickers: BTreeMap<String, Ticker>,
    funding: BTreeMap<String, Vec<FundingPoint>>,
    failing: BTreeSet<String>,
}

impl FixtureVenueClient {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_book(mut self, symbol: &str, l1: L1Snapshot, l2: L2Snapshot) -> Self {
        self.books.insert(symbol.to_ascii_uppercase(), (l1, l2));
        self
    }

    pub fn with_ticker(mut self, symbol: &str, ticker: Ticker) -> Self {
        self.tickers.insert(symbol.to_ascii_uppercase(), ticker);
        self
    }

    pub fn with_funding(mut self, symbol: &str, points: Vec<FundingPoint>) -> Self {
        self.funding.insert(symbol.to_ascii_uppercase(), points);
        self
    }

    /// Marks `symbol` to fail every fetch with a transport error, simulating
    /// an unreachable venue for a `VenueErrors[]` scenario.
    pub fn fail_for(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_ascii_uppercase());
        self
    }

    fn check_failing(&self, symbol: &Symbol) -> Result<(), VenueError> {
        if self.failing.contains(symbol.as_str()) {
            Err(VenueError::Transport(format!(
                "{}: fixture configured to fail for '{}'",
                self.name,
                symbol.as_str()
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VenueClient for FixtureVenueClient {
    fn venue_name(&self) -> &'static str {
        self.name
    }

    async fn fetch_order_book(
        &self,
        symbol: &Symbol,
        _depth_levels: usize,
    ) -> Result<(L1Snapshot, L2Snapshot), VenueError> {
        self.check_failing(symbol)?;
        self.books
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| VenueError::Api {
                status: 404,
                message: format!("no fixture order book for '{}'", symbol.as_str()),
            })
    }

    async fn fetch_ticker(&self, symbol: &Symbol) -> Result<Ticker, VenueError> {
        self.check_failing(symbol)?;
        self.tickers
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| VenueError::Api {
                status: 404,
                message: format!("no fixture ticker for '{}'", symbol.as_str()),
            })
    }

    async fn fetch_funding_history(
        &self,
        symbol: &Symbol,
        limit: usize,
    ) -> Result<Vec<FundingPoint>, VenueError> {
        self.check_failing(symbol)?;
        let points = self.funding.get(symbol.as_str()).cloned().unwrap_or_default();
        Ok(points.into_iter().rev().take(limit).rev().collect())
    }
}

/// Fixed-reading [`DetectorInputs`] for scenario tests that need a
/// deterministic regime vote without wiring a real breadth/volatility feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixtureDetectorInputs {
    pub realized_vol_7d: f64,
    pub breadth_above_20ma: f64,
    pub breadth_thrust_adx_proxy: f64,
    pub timestamp: i64,
}

impl FixtureDetectorInputs {
    pub fn new(
        realized_vol_7d: f64,
        breadth_above_20ma: f64,
        breadth_thrust_adx_proxy: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            realized_vol_7d,
            breadth_above_20ma,
            breadth_thrust_adx_proxy,
            timestamp,
        }
    }
}

#[async_trait]
impl DetectorInputs for FixtureDetectorInputs {
    async fn realized_volatility_7d(&self) -> Result<f64, VenueError> {
        Ok(self.realized_vol_7d)
    }

    async fn breadth_above_20ma(&self) -> Result<f64, VenueError> {
        Ok(self.breadth_above_20ma)
    }

    async fn breadth_thrust_adx_proxy(&self) -> Result<f64, VenueError> {
        Ok(self.breadth_thrust_adx_proxy)
    }

    async fn timestamp(&self) -> Result<i64, VenueError> {
        Ok(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{l1_snapshot, l2_ladder};
    use cryptorun_schemas::Venue;

    fn sym() -> Symbol {
        Symbol::try_new("BTCUSD").unwrap()
    }

    #[tokio::test]
    async fn returns_seeded_book() {
        let l1 = l1_snapshot("BTCUSD", Venue::Kraken, 50_000.0, 50_010.0, 1_700_000_000);
        let l2 = l2_ladder("BTCUSD", Venue::Kraken, 1_700_000_000, 10, 50_000.0, 50_010.0, 2.0);
        let client = FixtureVenueClient::new("kraken").with_book("BTCUSD", l1.clone(), l2.clone());

        let (got_l1, got_l2) = client.fetch_order_book(&sym(), 10).await.unwrap();
        assert_eq!(got_l1, l1);
        assert_eq!(got_l2, l2);
    }

    #[tokio::test]
    async fn missing_symbol_errors_api_404() {
        let client = FixtureVenueClient::new("kraken");
        let err = client.fetch_order_book(&sym(), 10).await.unwrap_err();
        assert!(matches!(err, VenueError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn failing_symbol_always_errors() {
        let l1 = l1_snapshot("BTCUSD", Venue::Kraken, 50_000.0, 50_010.0, 1_700_000_000);
        let l2 = l2_ladder("BTCUSD", Venue::Kraken, 1_700_000_000, 10, 50_000.0, 50_010.0, 2.0);
        let client = FixtureVenueClient::new("kraken")
            .with_book("BTCUSD", l1, l2)
            .fail_for("BTCUSD");
        let err = client.fetch_order_book(&sym(), 10).await.unwrap_err();
        assert!(matches!(err, VenueError::Transport(_)));
    }

    #[tokio::test]
    async fn funding_history_respects_limit_and_recency() {
        let points = vec![
            FundingPoint {
                timestamp: 1,
                rate: 0.01,
                volume_weighted_price: 100.0,
            },
            FundingPoint {
                timestamp: 2,
                rate: 0.02,
                volume_weighted_price: 101.0,
            },
            FundingPoint {
                timestamp: 3,
                rate: 0.03,
                volume_weighted_price: 102.0,
            },
        ];
        let client = FixtureVenueClient::new("kraken").with_funding("BTCUSD", points);
        let recent = client.fetch_funding_history(&sym(), 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.last().unwrap().timestamp, 3);
    }

    #[tokio::test]
    async fn detector_inputs_return_fixed_readings() {
        let detector = FixtureDetectorInputs::new(0.1, 0.8, 0.8, 1_700_000_000);
        assert_eq!(detector.realized_volatility_7d().await.unwrap(), 0.1);
        assert_eq!(detector.timestamp().await.unwrap(), 1_700_000_000);
    }
}

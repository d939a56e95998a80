//! Synthetic builders for the snapshot/factor/signal shapes every crate's
//! `scenario_*.rs` tests assemble by hand otherwise. No defaults are
//! "realistic market data" — each builder takes every field that matters
//! to the caller's scenario and fills the rest with values that pass a
//! clean default-profile check, so a test only has to override what it's
//! actually exercising.

use cryptorun_regime::RegimeSignals;
use cryptorun_schemas::{FactorBundle, L1Snapshot, L2Level, L2Snapshot, Symbol, Venue};
use cryptorun_venue::{FundingPoint, Ticker};

/// A clean top-of-book snapshot: `bid < ask`, both positive.
pub fn l1_snapshot(symbol: &str, venue: Venue, bid: f64, ask: f64, timestamp: i64) -> L1Snapshot {
    L1Snapshot {
        symbol: Symbol::try_new(symbol).expect("fixture symbol must be well-formed"),
        venue,
        timestamp,
        bid_price: bid,
        bid_size: 5.0,
        ask_price: ask,
        ask_size: 5.0,
        last: (bid + ask) / 2.0,
        sequence: 1,
    }
}

/// A symmetric `level_count`-deep ladder on each side, one unit price apart,
/// centered on `(best_bid, best_ask)`.
pub fn l2_ladder(
    symbol: &str,
    venue: Venue,
    timestamp: i64,
    level_count: usize,
    best_bid: f64,
    best_ask: f64,
    level_size: f64,
) -> L2Snapshot {
    let bids = (0..level_count)
        .map(|i| L2Level {
            price: best_bid - i as f64,
            size: level_size,
        })
        .collect();
    let asks = (0..level_count)
        .map(|i| L2Level {
            price: best_ask + i as f64,
            size: level_size,
        })
        .collect();
    L2Snapshot {
        symbol: Symbol::try_new(symbol).expect("fixture symbol must be well-formed"),
        venue,
        timestamp,
        bids,
        asks,
        sequence: 1,
    }
}

/// A [`FactorBundle`] with every field named explicitly, to keep scenario
/// tests readable about which factor they're perturbing.
#[allow(clippy::too_many_arguments)]
pub fn factor_bundle(
    momentum_core: f64,
    technical: f64,
    volume: f64,
    quality: f64,
    social: f64,
    brand: f64,
) -> FactorBundle {
    FactorBundle {
        momentum_core,
        technical,
        volume,
        quality,
        social,
        brand,
    }
}

/// Detector-input triple for the regime vote, named after the three
/// signals the detector actually reads.
pub fn regime_signals(
    realized_vol_7d: f64,
    breadth_above_20ma: f64,
    breadth_thrust_adx_proxy: f64,
) -> RegimeSignals {
    RegimeSignals {
        realized_vol_7d,
        breadth_above_20ma,
        breadth_thrust_adx_proxy,
    }
}

pub fn ticker(symbol: &str, last: f64, volume_24h_base: f64, high_24h: f64, low_24h: f64) -> Ticker {
    Ticker {
        symbol: Symbol::try_new(symbol).expect("fixture symbol must be well-formed"),
        last,
        volume_24h_base,
        high_24h,
        low_24h,
    }
}

pub fn funding_point(timestamp: i64, rate: f64, volume_weighted_price: f64) -> FundingPoint {
    FundingPoint {
        timestamp,
        rate,
        volume_weighted_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l1_snapshot_is_valid_by_construction() {
        let l1 = l1_snapshot("BTCUSD", Venue::Kraken, 50_000.0, 50_010.0, 1_700_000_000);
        assert!(l1.valid());
    }

    #[test]
    fn l2_ladder_is_ordered_and_uncrossed() {
        let l2 = l2_ladder("BTCUSD", Venue::Kraken, 1_700_000_000, 10, 50_000.0, 50_010.0, 2.0);
        assert!(l2.is_ordered());
        assert!(!l2.is_crossed());
        assert_eq!(l2.level_count(), 20);
    }
}

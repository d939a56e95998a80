use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;
use crate::venue::Venue;

/// Top-of-book snapshot. `valid()` enforces `ask > bid > 0`, per spec.md §3.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct L1Snapshot {
    pub symbol: Symbol,
    pub venue: Venue,
    /// Monotonic source-clock timestamp (epoch seconds); not wall-clock.
    pub timestamp: i64,
    pub bid_price: f64,
    pub bid_size: f64,
    pub ask_price: f64,
    pub ask_size: f64,
    pub last: f64,
    pub sequence: u64,
}

impl L1Snapshot {
    /// `ask > bid > 0`.
    pub fn valid(&self) -> bool {
        self.bid_price > 0.0 && self.ask_price > self.bid_price
    }

    pub fn mid(&self) -> f64 {
        (self.bid_price + self.ask_price) / 2.0
    }

    /// `(ask - bid) / mid * 10_000`.
    pub fn spread_bps(&self) -> f64 {
        let mid = self.mid();
        if mid <= 0.0 {
            return f64::INFINITY;
        }
        (self.ask_price - self.bid_price) / mid * 10_000.0
    }
}

/// One resting-order price level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct L2Level {
    pub price: f64,
    pub size: f64,
}

/// Order-book depth snapshot: bids descending by price, asks ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct L2Snapshot {
    pub symbol: Symbol,
    pub venue: Venue,
    pub timestamp: i64,
    /// Descending price order.
    pub bids: Vec<L2Level>,
    /// Ascending price order.
    pub asks: Vec<L2Level>,
    pub sequence: u64,
}

impl L2Snapshot {
    pub fn level_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    pub fn mid(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(b), Some(a)) if a > b && b > 0.0 => Some((a + b) / 2.0),
            _ => None,
        }
    }

    /// Are bids in non-increasing order and asks in non-decreasing order?
    pub fn is_ordered(&self) -> bool {
        self.bids.windows(2).all(|w| w[0].price >= w[1].price)
            && self.asks.windows(2).all(|w| w[0].price <= w[1].price)
    }

    /// USD-denominated sum of resting size within `±pct` of mid, on both
    /// sides. `pct` is a fraction, e.g. `0.02` for ±2%.
    pub fn depth_within_pct_usd(&self, pct: f64) -> f64 {
        let mid = match self.mid() {
            Some(m) => m,
            None => return 0.0,
        };
        let lower = mid * (1.0 - pct);
        let upper = mid * (1.0 + pct);

        let bid_usd: f64 = self
            .bids
            .iter()
            .filter(|l| l.price >= lower)
            .map(|l| l.price * l.size)
            .sum();
        let ask_usd: f64 = self
            .asks
            .iter()
            .filter(|l| l.price <= upper)
            .map(|l| l.price * l.size)
            .sum();

        bid_usd + ask_usd
    }

    /// Crossed book: best bid >= best ask.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(b), Some(a)) => b >= a,
            _ => false,
        }
    }
}

use std::collections::{BTreeMap, BTreeSet};

use cryptorun_schemas::Venue;
use tokio::sync::RwLock;

/// Point-in-time read of mutable policy state, handed to the pure
/// `validate_*` functions so they never touch the lock themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicySnapshot {
    pub paused: bool,
    pub blacklist: BTreeSet<String>,
    pub emergency_flags: BTreeMap<(String, Venue), bool>,
}

/// Serialized mutable policy state: global pause, symbol blacklist, and
/// per-(symbol, venue) emergency flags. Grounded on `mqk-isolation`'s
/// `RwLock`-guarded mutable-config pattern: many readers take a
/// [`PolicySnapshot`] concurrently, mutators take the write lock one at a
/// time.
#[derive(Debug, Default)]
pub struct PolicyManager {
    state: RwLock<PolicySnapshot>,
}

impl PolicyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the current state for use with the pure `validate_*` functions.
    pub async fn snapshot(&self) -> PolicySnapshot {
        self.state.read().await.clone()
    }

    pub async fn set_paused(&self, paused: bool) {
        self.state.write().await.paused = paused;
    }

    pub async fn blacklist_add(&self, symbol_raw: &str) {
        self.state
            .write()
            .await
            .blacklist
            .insert(symbol_raw.to_ascii_uppercase());
    }

    pub async fn blacklist_remove(&self, symbol_raw: &str) -> bool {
        self.state
            .write()
            .await
            .blacklist
            .remove(&symbol_raw.to_ascii_uppercase())
    }

    pub async fn set_emergency_flag(&self, symbol_raw: &str, venue: Venue, active: bool) {
        let key = (symbol_raw.to_ascii_uppercase(), venue);
        let mut guard = self.state.write().await;
        if active {
            guard.emergency_flags.insert(key, true);
        } else {
            guard.emergency_flags.remove(&key);
        }
    }
}

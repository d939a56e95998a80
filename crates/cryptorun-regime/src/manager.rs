use cryptorun_schemas::{Regime, RegimeState};
use tokio::sync::RwLock;

use crate::detect::{apply_decision, decide, RegimeSignals};

/// Default refresh cadence: 4 hours of source-clock time (spec.md §4.3).
pub const DEFAULT_CADENCE_SECS: i64 = 4 * 60 * 60;

/// Owns the process-resident [`RegimeState`] behind a reader/writer lock.
/// Grounded on `mqk-risk/src/engine.rs::tick()`'s rollover-on-id-change
/// pattern: the manager itself decides, from `now` vs. the stored
/// `next_update`, whether this call is a no-op read or a refresh —
/// the caller never has to track cadence itself.
#[derive(Debug)]
pub struct RegimeManager {
    state: RwLock<RegimeState>,
    cadence_secs: i64,
}

impl RegimeManager {
    pub fn new(initial_regime: Regime, at: i64, cadence_secs: i64) -> Self {
        Self {
            state: RwLock::new(RegimeState::initial(initial_regime, at, cadence_secs)),
            cadence_secs,
        }
    }

    pub async fn snapshot(&self) -> RegimeState {
        self.state.read().await.clone()
    }

    /// Refreshes the regime only if `now >= next_update`; otherwise returns
    /// the current snapshot unchanged (spec.md §4.3: "refresh no more
    /// frequently than every 4 hours").
    pub async fn maybe_update(&self, signals: &RegimeSignals, now: i64) -> RegimeState {
        let mut guard = self.state.write().await;
        if now < guard.next_update {
            return guard.clone();
        }
        let (winner, confidence, breakdown) = decide(signals);
        apply_decision(&mut guard, winner, confidence, breakdown, signals, now, self.cadence_secs);
        guard.clone()
    }
}

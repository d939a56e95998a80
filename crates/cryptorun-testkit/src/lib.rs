//! cryptorun-testkit
//!
//! Fixture builders and in-memory `VenueClient`/`DetectorInputs`
//! implementations shared by every crate's `#[cfg(test)]` modules and
//! `tests/scenario_*.rs` files, mirroring this workspace's own
//! `scenario_*` naming convention. No engine logic lives here.

mod fixture_venue;
mod fixtures;

pub use fixture_venue::{FixtureDetectorInputs, FixtureVenueClient};
pub use fixtures::{factor_bundle, funding_point, l1_snapshot, l2_ladder, regime_signals, ticker};

//! cryptorun-policy
//!
//! Policy admission checks (spec.md §4.1): USD-only quote enforcement,
//! venue preference, aggregator ban for microstructure data, stablecoin
//! depeg detection, and emergency controls. Pure `validate_*` functions plus
//! a serialized [`PolicyManager`] for the mutable state they read.

mod manager;
mod validate;

pub use manager::{PolicyManager, PolicySnapshot};
pub use validate::{
    validate_aggregator_ban, validate_all, validate_emergency_controls,
    validate_stablecoin_depeg, validate_usd_only, validate_venue_preference, ValidateAllInput,
    ValidationError,
};

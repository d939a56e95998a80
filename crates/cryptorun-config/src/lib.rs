//! cryptorun-config
//!
//! Layered YAML configuration: deep-merge, canonicalization + SHA-256
//! provenance hash, unused-key accounting, and environment-variable secret
//! resolution. No engine logic lives here.

mod consumption;
mod load;
mod secrets;

pub use load::{
    load_layered_yaml, load_layered_yaml_from_strings, report_unused_keys, ConfigMode,
    LoadedConfig, UnusedKeyPolicy, UnusedKeysReport,
};
pub use secrets::{resolve_secrets, ResolvedSecrets, ResolvedVenueKeys};

//! Secret resolution.
//!
//! # Contract
//! - Config YAML stores only **env var NAMES**, never values.
//! - Callers invoke [`resolve_secrets`] once at startup and pass the result
//!   down; no `std::env::var` calls scattered through the pipeline.
//! - `Debug` impls redact every value.
//! - Error messages name the env var, never its value.
//!
//! # Enforcement
//! CryptoRun only ever reads public market data and never places or manages
//! orders (order execution is explicitly out of scope), so no venue API key
//! is ever *required* — every venue falls back to unauthenticated public
//! endpoints at a lower rate limit when its key is absent. The Discord
//! alert webhook is likewise always optional.

use anyhow::Result;
use serde_json::Value;

/// Per-venue API key, resolved from the environment. `None` means the
/// pipeline uses that venue's public, unauthenticated endpoints.
#[derive(Clone, Default)]
pub struct ResolvedVenueKeys {
    pub kraken_api_key: Option<String>,
    pub binance_api_key: Option<String>,
    pub okx_api_key: Option<String>,
    pub coinbase_api_key: Option<String>,
}

impl std::fmt::Debug for ResolvedVenueKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedVenueKeys")
            .field("kraken_api_key", &redacted(&self.kraken_api_key))
            .field("binance_api_key", &redacted(&self.binance_api_key))
            .field("okx_api_key", &redacted(&self.okx_api_key))
            .field("coinbase_api_key", &redacted(&self.coinbase_api_key))
            .finish()
    }
}

/// All runtime-resolved secrets for one orchestrator instantiation.
#[derive(Clone, Default)]
pub struct ResolvedSecrets {
    pub venues: ResolvedVenueKeys,
    /// Discord webhook for gate-admission / emergency-control alerts.
    pub discord_webhook: Option<String>,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecrets")
            .field("venues", &self.venues)
            .field("discord_webhook", &redacted(&self.discord_webhook))
            .finish()
    }
}

fn redacted(v: &Option<String>) -> &'static str {
    if v.is_some() {
        "<REDACTED>"
    } else {
        "<ABSENT>"
    }
}

fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn read_str_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve every secret named (by env-var name) in `config_json`.
/// Always succeeds: every secret is optional by construction.
pub fn resolve_secrets(config_json: &Value) -> Result<ResolvedSecrets> {
    let kraken_var = read_str_at(config_json, "/venue/keys_env/kraken")
        .unwrap_or_else(|| "CRYPTORUN_KRAKEN_API_KEY".to_string());
    let binance_var = read_str_at(config_json, "/venue/keys_env/binance")
        .unwrap_or_else(|| "CRYPTORUN_BINANCE_API_KEY".to_string());
    let okx_var = read_str_at(config_json, "/venue/keys_env/okx")
        .unwrap_or_else(|| "CRYPTORUN_OKX_API_KEY".to_string());
    let coinbase_var = read_str_at(config_json, "/venue/keys_env/coinbase")
        .unwrap_or_else(|| "CRYPTORUN_COINBASE_API_KEY".to_string());
    let discord_var = read_str_at(config_json, "/discord/webhook_env");

    Ok(ResolvedSecrets {
        venues: ResolvedVenueKeys {
            kraken_api_key: resolve_env(&kraken_var),
            binance_api_key: resolve_env(&binance_var),
            okx_api_key: resolve_env(&okx_var),
            coinbase_api_key: resolve_env(&coinbase_var),
        },
        discord_webhook: discord_var.as_deref().and_then(resolve_env),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_env_vars_resolve_to_none_without_error() {
        let config: Value = serde_json::json!({});
        let secrets = resolve_secrets(&config).unwrap();
        assert!(secrets.venues.kraken_api_key.is_none());
        assert!(secrets.discord_webhook.is_none());
    }

    #[test]
    fn debug_output_never_contains_secret_values() {
        std::env::set_var("CRYPTORUN_TEST_SECRETS_KRAKEN_KEY", "super-secret-value");
        let config: Value = serde_json::json!({
            "venue": { "keys_env": { "kraken": "CRYPTORUN_TEST_SECRETS_KRAKEN_KEY" } }
        });
        let secrets = resolve_secrets(&config).unwrap();
        let debug = format!("{secrets:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("REDACTED"));
        std::env::remove_var("CRYPTORUN_TEST_SECRETS_KRAKEN_KEY");
    }
}

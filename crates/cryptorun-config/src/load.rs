use anyhow::{bail, Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

/// Result of loading and merging a layered YAML config stack.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_json: Value,
    pub canonical_json: String,
    pub config_hash: String,
}

/// Load and deep-merge YAML files in order (later files override earlier
/// ones), then canonicalize to sorted-key JSON and hash it (spec.md SPEC_FULL
/// §4 "Configuration").
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut sources = Vec::with_capacity(paths.len());
    for p in paths {
        let s = fs::read_to_string(p).with_context(|| format!("read config: {p}"))?;
        sources.push(s);
    }
    let refs: Vec<&str> = sources.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&refs)
}

/// Same as [`load_layered_yaml`] but over in-memory YAML strings. Used by
/// tests and by the CLI when config layers are embedded or generated.
pub fn load_layered_yaml_from_strings(layers: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());

    for (i, layer) in layers.iter().enumerate() {
        let yaml_val: serde_yaml::Value =
            serde_yaml::from_str(layer).with_context(|| format!("parse yaml layer {i}"))?;
        let json_val = serde_json::to_value(yaml_val).context("yaml->json conversion failed")?;
        deep_merge(&mut merged, json_val);
    }

    let canonical = canonicalize_json(&merged);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hash = hex::encode(hasher.finalize());

    Ok(LoadedConfig {
        config_json: serde_json::from_str(&canonical).context("canonical json parse failed")?,
        canonical_json: canonical,
        config_hash: hash,
    })
}

/// Deep-merge: objects merge recursively; arrays and scalars are replaced
/// wholesale by the later layer.
fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (k, v) in src_map {
                match dst_map.get_mut(&k) {
                    Some(existing) => deep_merge(existing, v),
                    None => {
                        dst_map.insert(k, v);
                    }
                }
            }
        }
        (dst_slot, src_val) => {
            *dst_slot = src_val;
        }
    }
}

/// Canonicalize JSON by sorting all object keys recursively, so the hash
/// is stable regardless of source key order (spec.md §8 property: config
/// hash determinism).
fn canonicalize_json(v: &Value) -> String {
    let sorted = sort_keys(v);
    serde_json::to_string(&sorted).expect("json serialization must not fail")
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

/// Operating mode for unused-key accounting. CryptoRun has no trading
/// modes (no execution, per Non-goals); modes distinguish which pipeline
/// sections a given run actually reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    /// Full scan run: policy, microstructure, regime, weights, gates, proof.
    Scan,
    /// Calibration-harness refit pass only.
    Calibration,
}

/// What to do when a config layer contains keys nothing in the pipeline
/// consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnusedKeysReport {
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeysReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Walk every leaf pointer in `config_json`, flag any not covered by the
/// consumed-pointer registry for `mode` (either the exact pointer or one of
/// its ancestors is registered as consumed).
pub fn report_unused_keys(
    mode: ConfigMode,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeysReport> {
    let consumed = crate::consumption::consumed_pointers(mode);
    let mut leaves = Vec::new();
    collect_leaf_pointers(config_json, String::new(), &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|p| !is_consumed(p, consumed))
        .collect();
    unused.sort();

    let report = UnusedKeysReport {
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused key(s): {}",
            report.unused_leaf_pointers.len(),
            report.unused_leaf_pointers.join(", ")
        );
    }

    Ok(report)
}

fn is_consumed(pointer: &str, consumed: &[&str]) -> bool {
    consumed
        .iter()
        .any(|c| pointer == *c || pointer.starts_with(&format!("{c}/")))
}

fn collect_leaf_pointers(v: &Value, prefix: String, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            if map.is_empty() {
                out.push(prefix);
                return;
            }
            for (k, val) in map {
                collect_leaf_pointers(val, format!("{prefix}/{k}"), out);
            }
        }
        _ => out.push(prefix),
    }
}

use anyhow::Result;

/// Mirrors the teacher CLI's `config-hash`: load and deep-merge a layered
/// YAML stack, print the provenance hash plus the canonical JSON it was
/// computed over.
pub fn run(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = cryptorun_config::load_layered_yaml(&path_refs)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

use assert_cmd::Command;
use predicates::prelude::*;

/// `config-hash` over the same layer stack twice must print the same hash
/// (spec.md §9: provenance hashing is a pure function of the merged config).
#[test]
fn config_hash_is_stable_across_runs() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    std::fs::write(&base, "policy:\n  paused: false\nscoring:\n  min_score: 75.0\n")?;
    std::fs::write(&overlay, "scoring:\n  min_score: 80.0\n")?;

    let base_s = base.to_string_lossy().to_string();
    let overlay_s = overlay.to_string_lossy().to_string();

    let first = Command::cargo_bin("cryptorun")?
        .args(["config-hash", &base_s, &overlay_s])
        .output()?;
    assert!(first.status.success());
    let first_stdout = String::from_utf8(first.stdout)?;

    let second = Command::cargo_bin("cryptorun")?
        .args(["config-hash", &base_s, &overlay_s])
        .output()?;
    assert!(second.status.success());
    let second_stdout = String::from_utf8(second.stdout)?;

    assert_eq!(first_stdout, second_stdout);
    assert!(first_stdout.lines().next().unwrap().starts_with("config_hash="));

    Ok(())
}

#[test]
fn config_hash_rejects_missing_file() {
    let mut cmd = Command::cargo_bin("cryptorun").unwrap();
    cmd.args(["config-hash", "/nonexistent/path/base.yaml"]);
    cmd.assert().failure().stderr(predicate::str::is_empty().not());
}

use assert_cmd::Command;

/// One symbol on one venue through `scan --inputs`, dry (no --artifacts-root):
/// the full Policy -> Microstructure -> Score -> Gate pipeline must run to
/// completion and print exactly one candidate line plus the summary
/// (spec.md §5/§6). Gate admission isn't asserted either way here — only
/// that the pipeline reaches a decision without error.
#[test]
fn scan_runs_single_symbol_fixture_to_completion() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let inputs_path = dir.path().join("inputs.json");

    let fixture = serde_json::json!({
        "detector": {
            "realized_vol_7d": 0.12,
            "breadth_above_20ma": 0.65,
            "breadth_thrust_adx_proxy": 0.55
        },
        "symbols": {
            "BTCUSD": {
                "factors": {
                    "momentum_core": 1.8,
                    "technical": 1.2,
                    "volume": 0.9,
                    "quality": 0.7,
                    "social": 3.0,
                    "brand": 2.0
                },
                "gate_signals": {
                    "funding_zscore": -2.4,
                    "price_to_vwap": 1.01,
                    "funding_venues_count": 3,
                    "funding_freshness_hours": 1.0,
                    "bar_age_bars": 0.5,
                    "signal_time_secs": 1_700_000_000,
                    "execution_time_secs": 1_700_000_010,
                    "atr_distance": 50.0,
                    "atr_current": 100.0,
                    "momentum_24h_pct": 8.0,
                    "rsi_4h": 55.0
                },
                "venues": {
                    "kraken": {
                        "l1": {
                            "symbol": "BTCUSD",
                            "venue": "kraken",
                            "timestamp": 1_700_000_000,
                            "bid_price": 50000.0,
                            "bid_size": 2.0,
                            "ask_price": 50005.0,
                            "ask_size": 2.0,
                            "last": 50002.0,
                            "sequence": 1
                        },
                        "l2": {
                            "symbol": "BTCUSD",
                            "venue": "kraken",
                            "timestamp": 1_700_000_000,
                            "bids": [{"price": 50000.0, "size": 5.0}, {"price": 49995.0, "size": 5.0}],
                            "asks": [{"price": 50005.0, "size": 5.0}, {"price": 50010.0, "size": 5.0}],
                            "sequence": 1
                        },
                        "reference": {
                            "data_source": "kraken",
                            "source_tier": "native",
                            "is_exchange_native": true,
                            "has_trades": true,
                            "high_24h": 51000.0,
                            "low_24h": 49000.0,
                            "volume_24h": 12000.0,
                            "market_cap": 980_000_000_000.0,
                            "avg_price": 50000.0,
                            "circulating_supply": 19_600_000.0
                        }
                    }
                }
            }
        }
    });

    std::fs::write(&inputs_path, serde_json::to_string_pretty(&fixture)?)?;

    let mut cmd = Command::cargo_bin("cryptorun")?;
    cmd.args([
        "scan",
        "--inputs",
        inputs_path.to_str().unwrap(),
        "--now",
        "1700000005",
    ]);

    let output = cmd.output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 1, "expected exactly one candidate line, got: {stdout}");

    let candidate: serde_json::Value = serde_json::from_str(lines[0])?;
    assert_eq!(candidate["symbol"], "BTCUSD");

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("candidates=1"), "stderr: {stderr}");

    Ok(())
}

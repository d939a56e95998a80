use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use cryptorun_calibration::CalibrationHarness;
use cryptorun_microstructure::MicrostructureProfile;
use cryptorun_orchestrator::{
    GateSignalInputs, Orchestrator, OrchestratorConfig, SymbolScanInput, VenueReferenceData,
};
use cryptorun_policy::PolicyManager;
use cryptorun_regime::{RegimeManager, WeightManager, DEFAULT_CADENCE_SECS};
use cryptorun_schemas::{FactorBundle, L1Snapshot, L2Snapshot, Regime, Symbol, Venue};
use cryptorun_testkit::{FixtureDetectorInputs, FixtureVenueClient};
use cryptorun_venue::{DetectorInputs, KrakenVenueClient, VenueClient};

/// One scan tick over a caller-supplied universe + fixture-shaped inputs.
///
/// Real venue connectivity beyond the reference Kraken client is out of
/// scope (spec.md §1/§6); this command's primary role is exercising the
/// full C1->C8 pipeline deterministically against a JSON fixture, the same
/// shape `cryptorun-testkit` builds for the crate's own scenario tests.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Layered YAML config paths, merged in order, for provenance hashing.
    /// Not currently mapped into gate/microstructure overrides beyond
    /// `--profile`; full config-driven threshold overlay is left to a
    /// future CLI revision (see DESIGN.md).
    #[arg(long = "config")]
    config_paths: Vec<String>,

    /// Path to a JSON `ScanInputFile` (see module docs).
    #[arg(long)]
    inputs: PathBuf,

    /// Root directory for proof/audit artifacts. Omit to run dry (score
    /// and print the candidate stream without writing anything).
    #[arg(long)]
    artifacts_root: Option<PathBuf>,

    /// Use the live Kraken reference client instead of the JSON fixture's
    /// seeded order books. Only meaningful for symbols whose fixture
    /// venue is `kraken`; other venues always run against the fixture.
    #[arg(long, default_value_t = false)]
    live_kraken: bool,

    #[arg(long, default_value = "default")]
    profile: String,

    #[arg(long, default_value_t = 16)]
    max_concurrent_symbols: usize,

    /// Epoch seconds to treat as "now". Required so a run is reproducible
    /// without reading the wall clock (spec.md §9).
    #[arg(long)]
    now: i64,
}

/// One venue's fixture input for a symbol: the order book the stubbed
/// `VenueClient` hands back, plus the reference data the orchestrator
/// itself consumes directly (spec.md §4.2/§6). The order book never flows
/// through `SymbolScanInput` — the real pipeline always fetches it through
/// `VenueClient::fetch_order_book`, so the fixture takes the same path.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct VenueFixture {
    l1: L1Snapshot,
    l2: L2Snapshot,
    reference: VenueReferenceData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct SymbolFixture {
    factors: FactorBundle,
    gate_signals: GateSignalInputs,
    venues: BTreeMap<Venue, VenueFixture>,
}

/// On-disk shape for `--inputs`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ScanInputFile {
    detector: DetectorSignals,
    symbols: BTreeMap<String, SymbolFixture>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct DetectorSignals {
    realized_vol_7d: f64,
    breadth_above_20ma: f64,
    breadth_thrust_adx_proxy: f64,
}

fn parse_profile(raw: &str) -> MicrostructureProfile {
    match raw.to_ascii_lowercase().as_str() {
        "strict" => MicrostructureProfile::Strict,
        _ => MicrostructureProfile::Default,
    }
}

pub async fn run(args: ScanArgs) -> Result<()> {
    let config_hash = if args.config_paths.is_empty() {
        "unconfigured".to_string()
    } else {
        let path_refs: Vec<&str> = args.config_paths.iter().map(|s| s.as_str()).collect();
        cryptorun_config::load_layered_yaml(&path_refs)?.config_hash
    };

    let raw = std::fs::read_to_string(&args.inputs)
        .with_context(|| format!("read scan inputs: {}", args.inputs.display()))?;
    let input_file: ScanInputFile =
        serde_json::from_str(&raw).with_context(|| "parse scan inputs JSON")?;

    let universe: Vec<Symbol> = input_file
        .symbols
        .keys()
        .map(Symbol::try_new)
        .collect::<Result<_, _>>()
        .context("universe symbol failed Symbol::try_new")?;

    let mut fixture_clients: BTreeMap<Venue, FixtureVenueClient> = Venue::PREFERENCE_ORDER
        .into_iter()
        .map(|v| (v, FixtureVenueClient::new(v.as_str())))
        .collect();

    let mut inputs: BTreeMap<String, SymbolScanInput> = BTreeMap::new();
    for (symbol_raw, fixture) in &input_file.symbols {
        let mut venue_refs: BTreeMap<Venue, VenueReferenceData> = BTreeMap::new();
        for (venue, venue_fixture) in &fixture.venues {
            if let Some(client) = fixture_clients.remove(venue) {
                fixture_clients.insert(
                    *venue,
                    client.with_book(symbol_raw, venue_fixture.l1.clone(), venue_fixture.l2.clone()),
                );
            }
            venue_refs.insert(*venue, venue_fixture.reference.clone());
        }
        inputs.insert(
            symbol_raw.to_ascii_uppercase(),
            SymbolScanInput {
                factors: fixture.factors.clone(),
                gate_signals: fixture.gate_signals,
                venues: venue_refs,
            },
        );
    }

    let detector: Arc<dyn DetectorInputs> = Arc::new(FixtureDetectorInputs::new(
        input_file.detector.realized_vol_7d,
        input_file.detector.breadth_above_20ma,
        input_file.detector.breadth_thrust_adx_proxy,
        args.now,
    ));

    let mut venues: BTreeMap<Venue, Arc<dyn VenueClient>> = BTreeMap::new();
    for (venue, client) in fixture_clients {
        venues.insert(venue, Arc::new(client));
    }
    if args.live_kraken {
        venues.insert(Venue::Kraken, Arc::new(KrakenVenueClient::new()));
    }

    let policy = Arc::new(PolicyManager::new());
    let regime = Arc::new(RegimeManager::new(Regime::Choppy, args.now, DEFAULT_CADENCE_SECS));
    let weights = Arc::new(WeightManager::with_defaults(Regime::Choppy));
    let calibration = Arc::new(RwLock::new(CalibrationHarness::with_defaults()));

    let config = OrchestratorConfig {
        max_concurrent_symbols: args.max_concurrent_symbols,
        microstructure_profile: parse_profile(&args.profile),
        artifacts_root: args.artifacts_root.clone(),
        ..Default::default()
    };

    let orchestrator = Orchestrator::new(policy, regime, weights, calibration, venues, detector, config);

    let report = orchestrator
        .run(&universe, &inputs, args.now, &config_hash, CancellationToken::new())
        .await?;

    for candidate in &report.candidates {
        println!("{}", serde_json::to_string(candidate)?);
    }

    eprintln!(
        "regime={} candidates={} rejected={} artifacts={}",
        report.regime,
        report.candidates.len(),
        report.rejected.len(),
        report.artifact_paths.len()
    );

    Ok(())
}

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{RwLock, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use cryptorun_calibration::CalibrationHarness;
use cryptorun_gates::{evaluate as evaluate_gates, GateConfig, GateInputs};
use cryptorun_microstructure::{MicrostructureProfile, MicrostructureThresholds};
use cryptorun_policy::{PolicyManager, PolicySnapshot};
use cryptorun_proof::{write_audit_report, write_eligibility_artifacts, AuditReport};
use cryptorun_regime::{RegimeManager, RegimeSignals, WeightManager};
use cryptorun_schemas::{AssetEligibilityResult, DataSource, ReasonCode, Regime, Symbol, Venue};
use cryptorun_scoring::{score_universe, SupplyDemandSplit};
use cryptorun_venue::{DetectorInputs, VenueClient};

use crate::candidate::{rank_candidates, ScanCandidate};
use crate::inputs::SymbolScanInput;
use crate::manifest::{manifest_path, ScanRunManifest};
use crate::pipeline::{best_vadr, build_proof_bundle, eligibility_from_bundles, policy_precheck};

fn date_from_epoch(now: i64) -> NaiveDate {
    chrono::DateTime::from_timestamp(now, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}

/// Tunables that do not change between ticks: concurrency bound, active
/// microstructure/gate profiles, artifact destination (spec.md §5, §6).
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    pub max_concurrent_symbols: usize,
    pub microstructure_profile: MicrostructureProfile,
    pub gate_config: GateConfig,
    pub supply_demand_split: SupplyDemandSplit,
    pub venue_order: Vec<Venue>,
    pub allow_venue_fallback: bool,
    pub artifacts_root: Option<PathBuf>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_symbols: 16,
            microstructure_profile: MicrostructureProfile::Default,
            gate_config: GateConfig::default(),
            supply_demand_split: SupplyDemandSplit::default(),
            venue_order: Venue::PREFERENCE_ORDER.to_vec(),
            allow_venue_fallback: true,
            artifacts_root: None,
        }
    }
}

/// Full result of one scan tick (spec.md §6): every candidate scored, the
/// regime that produced them, and the manifest filed for it.
#[derive(Debug)]
pub struct ScanReport {
    pub manifest: ScanRunManifest,
    pub regime: Regime,
    pub candidates: Vec<ScanCandidate>,
    pub rejected: Vec<(String, ReasonCode)>,
    pub artifact_paths: Vec<PathBuf>,
}

/// C9: ties every other component into one per-tick run. Grounded on
/// `mqk-testkit::Orchestrator::run()`'s init-artifacts -> process-units ->
/// write-audit -> return-report loop, generalized from a fixed bar stream to
/// a concurrent per-symbol venue-fetch-and-score pipeline.
pub struct Orchestrator {
    policy: Arc<PolicyManager>,
    regime: Arc<RegimeManager>,
    weights: Arc<WeightManager>,
    calibration: Arc<RwLock<CalibrationHarness>>,
    venues: BTreeMap<Venue, Arc<dyn VenueClient>>,
    detector: Arc<dyn DetectorInputs>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        policy: Arc<PolicyManager>,
        regime: Arc<RegimeManager>,
        weights: Arc<WeightManager>,
        calibration: Arc<RwLock<CalibrationHarness>>,
        venues: BTreeMap<Venue, Arc<dyn VenueClient>>,
        detector: Arc<dyn DetectorInputs>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            policy,
            regime,
            weights,
            calibration,
            venues,
            detector,
            config,
        }
    }

    /// Runs one scan tick over `universe`. `inputs` supplies the factor
    /// bundle, venue reference data, and gate-only signals this repository
    /// does not compute itself (spec.md §6). Returns a [`ScanReport`]
    /// regardless of how many symbols were admitted; zero admissions is a
    /// valid, successful run.
    pub async fn run(
        &self,
        universe: &[Symbol],
        inputs: &BTreeMap<String, SymbolScanInput>,
        now: i64,
        config_hash: &str,
        cancellation: CancellationToken,
    ) -> anyhow::Result<ScanReport> {
        // C3/C4: one regime read-or-refresh per tick, shared by every
        // symbol scored this run (spec.md §5).
        let signals = RegimeSignals {
            realized_vol_7d: self.detector.realized_volatility_7d().await?,
            breadth_above_20ma: self.detector.breadth_above_20ma().await?,
            breadth_thrust_adx_proxy: self.detector.breadth_thrust_adx_proxy().await?,
        };
        let regime_state = self.regime.maybe_update(&signals, now).await;
        let regime = regime_state.regime;
        self.weights.switch_to(regime).await;
        let weight_preset = self.weights.current_preset().await.clone();

        // C1: one policy snapshot per tick. No lock is ever held across an
        // await into another manager's lock, so Policy -> WeightManager ->
        // CalibrationHarness acquisition order is enforced by construction
        // rather than by an explicit guard (spec.md §5).
        let policy_snapshot = self.policy.snapshot().await;

        let thresholds = self.config.microstructure_profile.thresholds();

        let outcomes = self
            .run_phase_a(universe, inputs, &policy_snapshot, &thresholds, now, &cancellation)
            .await;

        let mut rejected = Vec::new();
        let mut eligibility_results = Vec::new();
        let mut scorable: Vec<(Symbol, cryptorun_schemas::FactorBundle)> = Vec::new();
        let mut eligibility_by_symbol: BTreeMap<String, AssetEligibilityResult> = BTreeMap::new();

        for outcome in outcomes {
            match outcome {
                SymbolOutcome::PolicyRejected { symbol, reason } => {
                    rejected.push((symbol.as_str().to_string(), reason));
                }
                SymbolOutcome::Checked { symbol, factors, eligibility } => {
                    if eligibility.overall_eligible {
                        scorable.push((symbol.clone(), factors));
                    } else {
                        rejected.push((symbol.as_str().to_string(), ReasonCode::MicrostructureFail));
                    }
                    eligibility_by_symbol.insert(symbol.as_str().to_string(), eligibility.clone());
                    eligibility_results.push(eligibility);
                }
            }
        }

        let mut candidates = Vec::new();
        if !scorable.is_empty() {
            // C5/C6: one cross-sectional scoring pass, never per-symbol —
            // orthogonalization needs every symbol's factor column at once
            // (spec.md §5).
            let scored = score_universe(&scorable, &weight_preset, self.config.supply_demand_split)?;

            let calibration = self.calibration.read().await;
            for (symbol, score) in scored {
                let eligibility = eligibility_by_symbol
                    .get(symbol.as_str())
                    .expect("every scored symbol was checked in phase A");
                let gate_signals = inputs
                    .get(symbol.as_str())
                    .expect("every scored symbol has caller-supplied input")
                    .gate_signals;

                let gate_inputs = GateInputs {
                    final_with_social: score.final_with_social,
                    vadr: best_vadr(eligibility),
                    funding_zscore: gate_signals.funding_zscore,
                    price_to_vwap: gate_signals.price_to_vwap,
                    funding_venues_count: gate_signals.funding_venues_count,
                    funding_freshness_hours: gate_signals.funding_freshness_hours,
                    bar_age_bars: gate_signals.bar_age_bars,
                    signal_time_secs: gate_signals.signal_time_secs,
                    execution_time_secs: gate_signals.execution_time_secs,
                    atr_distance: gate_signals.atr_distance,
                    atr_current: gate_signals.atr_current,
                    microstructure_passed: eligibility.overall_eligible,
                    momentum_24h_pct: gate_signals.momentum_24h_pct,
                    rsi_4h: gate_signals.rsi_4h,
                };
                let gate = evaluate_gates(&self.config.gate_config, &gate_inputs);
                let hit_probability = calibration.predict(regime, score.final_with_social);
                let calibrator_kind = calibration.calibrator_kind(regime);

                candidates.push(ScanCandidate {
                    symbol: symbol.as_str().to_string(),
                    regime,
                    score,
                    gate,
                    hit_probability,
                    calibrator_kind,
                    eligible_venues: eligibility.eligible_venues.clone(),
                    venue_errors: eligibility.venue_errors.clone(),
                });
            }
        }

        let candidates = rank_candidates(candidates);

        let date = date_from_epoch(now);
        let manifest = ScanRunManifest::new(config_hash, now, universe.len());
        let mut artifact_paths = Vec::new();

        if let Some(root) = &self.config.artifacts_root {
            for result in &eligibility_results {
                artifact_paths.extend(write_eligibility_artifacts(root, date, result)?);
            }
            let audit = AuditReport::from_results(date, now, &eligibility_results);
            let hhmmss = chrono::DateTime::from_timestamp(now, 0)
                .map(|dt| dt.format("%H%M%S").to_string())
                .unwrap_or_else(|| "000000".to_string());
            artifact_paths.push(write_audit_report(root, date, &hhmmss, &audit)?);

            let manifest_file = manifest_path(root, date);
            cryptorun_proof::write_atomic_json(&manifest_file, &manifest)?;
            artifact_paths.push(manifest_file);
        }

        Ok(ScanReport {
            manifest,
            regime,
            candidates,
            rejected,
            artifact_paths,
        })
    }

    async fn run_phase_a(
        &self,
        universe: &[Symbol],
        inputs: &BTreeMap<String, SymbolScanInput>,
        policy_snapshot: &PolicySnapshot,
        thresholds: &MicrostructureThresholds,
        now: i64,
        cancellation: &CancellationToken,
    ) -> Vec<SymbolOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_symbols.max(1)));
        let mut join_set: JoinSet<Option<SymbolOutcome>> = JoinSet::new();

        for symbol in universe {
            let Some(input) = inputs.get(symbol.as_str()) else {
                continue;
            };
            let symbol = symbol.clone();
            let input = input.clone();
            let semaphore = semaphore.clone();
            let venues = self.venues.clone();
            let venue_order = self.config.venue_order.clone();
            let allow_fallback = self.config.allow_venue_fallback;
            let policy_snapshot = policy_snapshot.clone();
            let thresholds = *thresholds;
            let cancellation = cancellation.clone();

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                if cancellation.is_cancelled() {
                    return None;
                }
                Some(
                    run_symbol_phase_a(
                        symbol,
                        input,
                        policy_snapshot,
                        venues,
                        venue_order,
                        allow_fallback,
                        thresholds,
                        now,
                    )
                    .await,
                )
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            if let Ok(Some(outcome)) = joined {
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}

enum SymbolOutcome {
    PolicyRejected {
        symbol: Symbol,
        reason: ReasonCode,
    },
    Checked {
        symbol: Symbol,
        factors: cryptorun_schemas::FactorBundle,
        eligibility: AssetEligibilityResult,
    },
}

async fn run_symbol_phase_a(
    symbol: Symbol,
    input: SymbolScanInput,
    policy_snapshot: PolicySnapshot,
    venues: BTreeMap<Venue, Arc<dyn VenueClient>>,
    venue_order: Vec<Venue>,
    allow_fallback: bool,
    thresholds: MicrostructureThresholds,
    now: i64,
) -> SymbolOutcome {
    let primary_venue = venue_order.iter().find(|v| venues.contains_key(v)).copied();
    let price = match primary_venue.and_then(|v| venues.get(&v)) {
        Some(client) => client
            .fetch_ticker(&symbol)
            .await
            .map(|t| t.last)
            .unwrap_or(1.0),
        None => 1.0,
    };
    let primary_source: DataSource = primary_venue.map(DataSource::from).unwrap_or_else(|| DataSource::new("none"));

    if let Some(reason) = policy_precheck(
        &policy_snapshot,
        &symbol,
        primary_venue,
        allow_fallback,
        &primary_source,
        price,
    ) {
        return SymbolOutcome::PolicyRejected { symbol, reason };
    }

    let mut bundles = Vec::new();
    let mut venue_errors = Vec::new();

    for (venue, reference) in &input.venues {
        let Some(client) = venues.get(venue) else {
            venue_errors.push(format!("{venue}: no client configured"));
            continue;
        };
        match client.fetch_order_book(&symbol, 20).await {
            Ok((l1, l2)) => {
                let bundle = build_proof_bundle(&symbol, *venue, now, reference, l1, l2, &thresholds);
                bundles.push(bundle);
            }
            Err(e) => venue_errors.push(format!("{venue}: {e}")),
        }
    }

    let eligibility = eligibility_from_bundles(&symbol, now, bundles, venue_errors);

    SymbolOutcome::Checked {
        symbol,
        factors: input.factors,
        eligibility,
    }
}

// shufflegrind-engine/src/runtime.rs

/*!
# Runtime Engine

Wires configuration, the simulator and telemetry together. Two modes are
provided: a single paired experiment (honest then grinding) and a sweep that
repeats the experiment over consecutive seeds. Frontends only ever call into
this module, so the CLI stays a thin argument layer.
*/

use opentelemetry::KeyValue;
use serde::Serialize;
use tracing::{error, info, instrument};

use shufflegrind_config::{ExperimentConfig, ShufflegrindConfig};
use shufflegrind_core::ProtocolError;
use shufflegrind_simulator::{run_experiment, ExperimentParams, ExperimentReport, RunOutcome};
use shufflegrind_telemetry::{logging::EventLogger, metrics::MetricsRecorder};

use crate::engine::{EngineError, PacingObserver, ProgressReporter};

/// Maps the validated configuration section onto simulator parameters.
pub fn params_from_config(config: &ExperimentConfig) -> ExperimentParams {
    ExperimentParams {
        organic_count: config.organic_count,
        coalition_count: config.coalition_count,
        rounds: config.rounds,
        seed: config.seed,
        organic_prefix: config.organic_prefix.clone(),
        coalition_prefix: config.coalition_prefix.clone(),
    }
}

/// Runs one paired experiment.
///
/// * `validate_digest` is compared against the grinding run's history digest.
#[instrument(
    level = "info",
    name = "run_simulation_mode",
    skip(config, metrics),
    fields(seed = config.experiment.seed, rounds = config.experiment.rounds)
)]
pub fn run_simulation_mode(
    config: &ShufflegrindConfig,
    validate_digest: Option<&str>,
    metrics: &MetricsRecorder,
) -> Result<ExperimentReport, EngineError> {
    config.check()?;
    let params = params_from_config(&config.experiment);
    let report = run_experiment(&params, PacingObserver::from_config(&config.pacing))?;
    record_outcome(metrics, &report.honest);
    record_outcome(metrics, &report.grinding);

    let digest = &report.grinding.digest;
    info!("Simulation complete. History digest: {}", digest);
    if let Some(expected) = validate_digest {
        if !digest.eq_ignore_ascii_case(expected.trim()) {
            error!(expected, actual = %digest, "History digest mismatch");
            return Err(EngineError::DigestMismatch {
                expected: expected.to_owned(),
                actual: digest.clone(),
            });
        }
    }

    EventLogger::log_event(
        "simulation_complete",
        vec![
            KeyValue::new("seed", params.seed.to_string()),
            KeyValue::new("rounds", params.rounds as i64),
            KeyValue::new("honest_pct", report.honest.tally.percentage()),
            KeyValue::new("grinding_pct", report.grinding.tally.percentage()),
            KeyValue::new("reshuffles", report.grinding.reshuffles as i64),
            KeyValue::new("history_digest", digest.clone()),
        ],
    );
    Ok(report)
}

/// Per-seed result of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedOutcome {
    pub seed: u64,
    pub honest_fraction: f64,
    pub grinding_fraction: f64,
}

impl SeedOutcome {
    pub fn advantage(&self) -> f64 {
        self.grinding_fraction - self.honest_fraction
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepSummary {
    pub outcomes: Vec<SeedOutcome>,
}

impl SweepSummary {
    /// Mean grinding advantage in fraction points; 0 for an empty sweep.
    pub fn mean_advantage(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.outcomes.iter().map(SeedOutcome::advantage).sum();
        total / self.outcomes.len() as f64
    }
}

/// Repeats the paired experiment for `iterations` consecutive seeds, starting
/// at the configured one. Verbose pacing is ignored here.
#[instrument(level = "info", name = "run_sweep_mode", skip(config, metrics))]
pub fn run_sweep_mode(
    config: &ShufflegrindConfig,
    iterations: usize,
    metrics: &MetricsRecorder,
) -> Result<SweepSummary, EngineError> {
    config.check()?;
    if iterations == 0 {
        return Err(ProtocolError::invalid("sweep needs at least one iteration").into());
    }

    let base = params_from_config(&config.experiment);
    let mut summary = SweepSummary::default();
    for offset in 0..iterations {
        let params = ExperimentParams {
            seed: base.seed.wrapping_add(offset as u64),
            ..base.clone()
        };
        let report = run_experiment(
            &params,
            ProgressReporter::new(config.pacing.progress_interval),
        )?;
        record_outcome(metrics, &report.honest);
        record_outcome(metrics, &report.grinding);

        let outcome = SeedOutcome {
            seed: params.seed,
            honest_fraction: report.honest.tally.fraction(),
            grinding_fraction: report.grinding.tally.fraction(),
        };
        info!(
            seed = outcome.seed,
            honest_pct = report.honest.tally.percentage(),
            grinding_pct = report.grinding.tally.percentage(),
            "Seed {}/{} complete",
            offset + 1,
            iterations
        );
        summary.outcomes.push(outcome);
    }

    let mean = summary.mean_advantage();
    info!("Sweep complete. Mean advantage: {:.2} points", 100.0 * mean);
    EventLogger::log_event(
        "sweep_complete",
        vec![
            KeyValue::new("first_seed", base.seed.to_string()),
            KeyValue::new("iterations", iterations as i64),
            KeyValue::new("mean_advantage", mean),
        ],
    );
    Ok(summary)
}

/// Renders the recorder's registry for printing.
pub fn render_metrics(metrics: &MetricsRecorder) -> Result<String, EngineError> {
    metrics
        .gather_metrics()
        .map_err(|e| EngineError::Telemetry(e.to_string()))
}

fn record_outcome(metrics: &MetricsRecorder, outcome: &RunOutcome) {
    metrics.record_run(
        &outcome.strategy,
        outcome.tally.rounds,
        outcome.reshuffles,
        outcome.tally.wins,
    );
}

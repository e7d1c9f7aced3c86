use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use shufflegrind_config::{ExperimentConfig, ShufflegrindConfig};
use shufflegrind_engine::engine::{render_summary, render_yaml};
use shufflegrind_engine::{render_metrics, run_simulation_mode, run_sweep_mode};
use shufflegrind_telemetry::logging::EventLogger;
use shufflegrind_telemetry::metrics::MetricsRecorder;

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "shufflegrind", version, about)]
pub struct Cli {
    /// Configuration file; defaults to config/shufflegrind.yaml when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the honest and the grinding simulation on one seeded stream
    Simulate(SimulateArgs),
    /// Repeat the experiment over consecutive seeds
    Sweep(SweepArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExperimentArgs {
    /// Organic validator count
    #[arg(long)]
    pub organic: Option<usize>,
    /// Coalition validator count, reserve included
    #[arg(long)]
    pub coalition: Option<usize>,
    /// Blocks produced per run
    #[arg(long)]
    pub rounds: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ExperimentArgs {
    fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(organic) = self.organic {
            config.organic_count = organic;
        }
        if let Some(coalition) = self.coalition {
            config.coalition_count = coalition;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
    /// Print every pending block and forced reshuffle
    #[arg(short, long)]
    pub verbose: bool,
    /// Pause between rounds in verbose mode
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Expected hex digest of the grinding run's history
    #[arg(long)]
    pub validate_digest: Option<String>,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
    /// Print a YAML summary instead of the text report
    #[arg(long)]
    pub yaml: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
    /// Number of consecutive seeds to run
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,
    /// Print Prometheus metrics after the sweep
    #[arg(long)]
    pub metrics: bool,
}

/// Loads configuration and applies flag overrides. Validation happens in the
/// engine, after overrides.
pub fn resolve_config(cli: &Cli) -> Result<ShufflegrindConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ShufflegrindConfig::load_from_path(path)?,
        None => ShufflegrindConfig::load()?,
    };

    match &cli.command {
        Commands::Simulate(args) => {
            args.experiment.apply(&mut config.experiment);
            if args.verbose {
                config.pacing.verbose = true;
            }
            if let Some(delay_ms) = args.delay_ms {
                config.pacing.delay_ms = delay_ms;
            }
            if args.metrics {
                config.telemetry.print_metrics = true;
            }
        }
        Commands::Sweep(args) => {
            args.experiment.apply(&mut config.experiment);
            if args.metrics {
                config.telemetry.print_metrics = true;
            }
        }
    }
    Ok(config)
}

pub fn run_command(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    EventLogger::init(&config.telemetry.log_level);
    debug!(?config, "Configuration resolved");
    let metrics = MetricsRecorder::new().map_err(|e| CliError::Metrics(e.to_string()))?;

    match cli.command {
        Commands::Simulate(args) => {
            let report = run_simulation_mode(&config, args.validate_digest.as_deref(), &metrics)?;
            if args.yaml {
                print!("{}", render_yaml(&report).map_err(|e| CliError::Engine(e.into()))?);
            } else {
                print!("{}", render_summary(&report));
                println!("Grinding history digest: {}", report.grinding.digest);
            }
        }
        Commands::Sweep(args) => {
            let summary = run_sweep_mode(&config, args.iterations, &metrics)?;
            for outcome in &summary.outcomes {
                println!(
                    "Seed {}: without grinding {:.2}%, with grinding {:.2}%",
                    outcome.seed,
                    100.0 * outcome.honest_fraction,
                    100.0 * outcome.grinding_fraction
                );
            }
            println!(
                "Mean advantage over {} seeds: {:.2} percentage points",
                summary.outcomes.len(),
                100.0 * summary.mean_advantage()
            );
        }
    }

    if config.telemetry.print_metrics {
        print!("{}", render_metrics(&metrics)?);
    }
    Ok(())
}

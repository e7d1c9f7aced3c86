pub mod engine;
pub mod runtime;

// Re-export the runtime functions so frontends can simply do:
pub use runtime::{
    params_from_config, render_metrics, run_simulation_mode, run_sweep_mode, SeedOutcome,
    SweepSummary,
};

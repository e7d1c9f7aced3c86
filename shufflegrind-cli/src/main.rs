//! ## shufflegrind-cli
//! **Command-line frontend for the shuffle grinding experiment**
//!
//! `simulate` runs one paired experiment (honest, then grinding) and prints
//! the outcome. `sweep` repeats it over consecutive seeds.
//!
//! ### Expectations:
//! - Flags override values loaded from `config/shufflegrind.yaml` and
//!   `SHUFFLEGRIND_*` variables
//! - Logs go to the tracing subscriber; results go to stdout

use clap::Parser;

mod commands;
mod error;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    commands::run_command(cli)?;
    Ok(())
}

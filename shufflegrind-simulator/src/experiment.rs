//! Paired experiment: an honest run followed by a grinding run.
//!
//! Both phases draw from one seeded stream. The grinding phase picks up the
//! stream exactly where the honest phase left it, so a seed fixes the whole
//! experiment.

use serde::Serialize;
use tracing::{info, instrument};

use shufflegrind_core::{ProtocolError, SeededShuffle, ValidatorId};

use crate::observer::RoundObserver;
use crate::roster::Roster;
use crate::strategy::{BlockStrategy, GrindingStrategy, HonestStrategy};
use crate::tally::stake_share;
use crate::{RunOutcome, Simulator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentParams {
    pub organic_count: usize,
    pub coalition_count: usize,
    pub rounds: usize,
    pub seed: u64,
    pub organic_prefix: String,
    pub coalition_prefix: String,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            organic_count: 80,
            coalition_count: 20,
            rounds: 100_000,
            seed: 42,
            organic_prefix: "organic_validator".into(),
            coalition_prefix: "alice_validator".into(),
        }
    }
}

impl ExperimentParams {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.rounds == 0 {
            return Err(ProtocolError::invalid("round count must be positive"));
        }
        if self.organic_count == 0 {
            return Err(ProtocolError::invalid(
                "coalition cannot hold the entire roster",
            ));
        }
        if self.coalition_count < 2 {
            return Err(ProtocolError::invalid(
                "coalition needs a reserve validator plus at least one staked member",
            ));
        }
        if self.organic_prefix == self.coalition_prefix {
            return Err(ProtocolError::invalid(
                "organic and coalition prefixes must differ",
            ));
        }
        Ok(())
    }

    pub fn total_validators(&self) -> usize {
        self.organic_count + self.coalition_count
    }

    /// Coalition share of the full roster, in `[0, 1]`.
    pub fn stake_share(&self) -> f64 {
        stake_share(self.coalition_count, self.total_validators())
    }

    pub fn roster(&self) -> Roster {
        Roster::generate(
            &self.organic_prefix,
            self.organic_count,
            &self.coalition_prefix,
            self.coalition_count,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub params: ExperimentParams,
    pub reserve: ValidatorId,
    pub honest: RunOutcome,
    pub grinding: RunOutcome,
}

impl ExperimentReport {
    /// Extra share of blocks won by grinding, in fraction points.
    pub fn advantage(&self) -> f64 {
        self.grinding.tally.fraction() - self.honest.tally.fraction()
    }

    /// Fingerprint of both phases together.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.honest.digest.as_bytes());
        hasher.update(self.grinding.digest.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }
}

/// Runs the honest phase, then the grinding phase, on one seeded stream.
#[instrument(level = "info", skip(observer), fields(seed = params.seed, rounds = params.rounds))]
pub fn run_experiment<O: RoundObserver>(
    params: &ExperimentParams,
    mut observer: O,
) -> Result<ExperimentReport, ProtocolError> {
    params.validate()?;
    let roster = params.roster();
    let source = SeededShuffle::new(params.seed);

    let mut honest = HonestStrategy;
    let mut simulator = Simulator::new(roster.full(), source)?;
    simulator.run(params.rounds, &mut honest, &mut observer)?;
    let (honest_outcome, source) = simulator.finish(honest.name());

    let (grinding_roster, reserve) = roster.split_reserve()?;
    let mut grinder = GrindingStrategy::new(reserve.clone())?;
    let mut simulator = Simulator::new(grinding_roster, source)?;
    simulator.run(params.rounds, &mut grinder, &mut observer)?;
    let (grinding_outcome, _) = simulator.finish(grinder.name());

    let report = ExperimentReport {
        params: params.clone(),
        reserve,
        honest: honest_outcome,
        grinding: grinding_outcome,
    };
    info!(
        honest_pct = report.honest.tally.percentage(),
        grinding_pct = report.grinding.tally.percentage(),
        reshuffles = report.grinding.reshuffles,
        "Experiment complete"
    );
    Ok(report)
}

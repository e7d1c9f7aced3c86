//! Presentation observers: periodic progress logs and the verbose walkthrough.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use shufflegrind_config::PacingConfig;
use shufflegrind_core::ValidatorId;
use shufflegrind_simulator::RoundObserver;

use super::report::COALITION_LABEL;

const COALITION_MARKER: &str = " <--------";

/// Logs `Progress: done/total` every `interval` blocks.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    interval: usize,
    strategy: String,
    rounds: usize,
}

impl ProgressReporter {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            strategy: String::new(),
            rounds: 0,
        }
    }
}

impl RoundObserver for ProgressReporter {
    fn on_run_start(&mut self, strategy: &str, rounds: usize) {
        self.strategy = strategy.to_owned();
        self.rounds = rounds;
    }

    fn on_block(&mut self, round: usize, _producer: &ValidatorId) {
        let done = round + 1;
        if done % self.interval == 0 {
            info!(strategy = %self.strategy, "Progress: {}/{}", done, self.rounds);
        }
    }
}

/// Prints every pending block and every forced reshuffle, pausing between
/// rounds.
pub struct VerbosePacer<W: Write> {
    out: W,
    delay: Duration,
}

impl VerbosePacer<io::Stdout> {
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> VerbosePacer<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self { out, delay }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pending(&mut self, round: usize, producer: &ValidatorId) {
        let marker = if producer.is_coalition() {
            COALITION_MARKER
        } else {
            ""
        };
        self.emit(format_args!(
            "Pending block {round} to be produced by {producer}{marker}"
        ));
    }

    // Console output is best effort; a closed pipe must not abort the run.
    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            debug!("Verbose output dropped: {}", e);
        }
    }
}

impl<W: Write> RoundObserver for VerbosePacer<W> {
    fn on_run_start(&mut self, strategy: &str, _rounds: usize) {
        let title = match strategy {
            "grinding" => "reserve validator shenanigans",
            "honest" => "no shenanigans",
            other => other,
        };
        self.emit(format_args!("\n>>>>>> Simulating mining ({title})\n"));
    }

    fn on_pending(&mut self, round: usize, producer: &ValidatorId) {
        self.pending(round, producer);
    }

    fn on_reshuffle(&mut self, round: usize, producer: &ValidatorId) {
        self.emit(format_args!("** {COALITION_LABEL} triggers reshuffle"));
        self.pending(round, producer);
    }

    fn on_block(&mut self, _round: usize, _producer: &ValidatorId) {
        self.emit(format_args!(""));
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// The observer the runtime hands to an experiment.
pub struct PacingObserver {
    progress: ProgressReporter,
    verbose: Option<VerbosePacer<io::Stdout>>,
}

impl PacingObserver {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            progress: ProgressReporter::new(config.progress_interval),
            verbose: config
                .verbose
                .then(|| VerbosePacer::stdout(Duration::from_millis(config.delay_ms))),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.is_some()
    }
}

impl RoundObserver for PacingObserver {
    fn on_run_start(&mut self, strategy: &str, rounds: usize) {
        self.progress.on_run_start(strategy, rounds);
        if let Some(verbose) = self.verbose.as_mut() {
            verbose.on_run_start(strategy, rounds);
        }
    }

    fn on_pending(&mut self, round: usize, producer: &ValidatorId) {
        if let Some(verbose) = self.verbose.as_mut() {
            verbose.on_pending(round, producer);
        }
    }

    fn on_reshuffle(&mut self, round: usize, producer: &ValidatorId) {
        if let Some(verbose) = self.verbose.as_mut() {
            verbose.on_reshuffle(round, producer);
        }
    }

    fn on_block(&mut self, round: usize, producer: &ValidatorId) {
        self.progress.on_block(round, producer);
        if let Some(verbose) = self.verbose.as_mut() {
            verbose.on_block(round, producer);
        }
    }

    fn on_run_end(&mut self, strategy: &str, rounds: usize) {
        self.progress.on_run_end(strategy, rounds);
        if let Some(verbose) = self.verbose.as_mut() {
            verbose.on_run_end(strategy, rounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn capture(pacer: VerbosePacer<Vec<u8>>) -> String {
        String::from_utf8(pacer.into_inner()).unwrap()
    }

    #[test]
    fn verbose_lines_follow_the_round() {
        let organic = ValidatorId::organic("organic_validator_3");
        let alice = ValidatorId::coalition("alice_validator_1");

        let mut pacer = VerbosePacer::new(Vec::new(), Duration::ZERO);
        pacer.on_run_start("grinding", 1);
        pacer.on_pending(0, &organic);
        pacer.on_reshuffle(0, &alice);
        pacer.on_block(0, &alice);

        let text = capture(pacer);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                ">>>>>> Simulating mining (reserve validator shenanigans)",
                "",
                "Pending block 0 to be produced by organic_validator_3",
                "** Alice triggers reshuffle",
                "Pending block 0 to be produced by alice_validator_1 <--------",
                "",
            ]
        );
    }

    #[test]
    fn honest_header() {
        let mut pacer = VerbosePacer::new(Vec::new(), Duration::ZERO);
        pacer.on_run_start("honest", 10);
        assert!(capture(pacer).contains(">>>>>> Simulating mining (no shenanigans)"));
    }

    #[traced_test]
    #[test]
    fn progress_every_interval() {
        let producer = ValidatorId::organic("organic_validator_0");
        let mut progress = ProgressReporter::new(4);
        progress.on_run_start("honest", 8);
        for round in 0..8 {
            progress.on_block(round, &producer);
        }
        assert!(logs_contain("Progress: 4/8"));
        assert!(logs_contain("Progress: 8/8"));
        assert!(!logs_contain("Progress: 3/8"));
    }

    #[test]
    fn quiet_pacing_has_no_verbose_pacer() {
        let observer = PacingObserver::from_config(&PacingConfig::default());
        assert!(!observer.is_verbose());

        let verbose = PacingObserver::from_config(&PacingConfig {
            verbose: true,
            ..PacingConfig::default()
        });
        assert!(verbose.is_verbose());
    }
}

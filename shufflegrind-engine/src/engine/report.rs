//! Plain-text and YAML renderings of a finished experiment.

use std::fmt::Write;

use shufflegrind_simulator::{CoalitionTally, ExperimentReport};

/// Name the coalition goes by in human-facing output.
pub const COALITION_LABEL: &str = "Alice";

/// Configuration echo, stake share and both win counts, one per line.
pub fn render_summary(report: &ExperimentReport) -> String {
    let params = &report.params;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Running with {} organic validators and {} {} validators",
        params.organic_count, params.coalition_count, COALITION_LABEL
    );
    let _ = writeln!(
        out,
        "({} has {:.2}% of the stake)",
        COALITION_LABEL,
        100.0 * params.stake_share()
    );
    write_wins(&mut out, "Without", &report.honest.tally);
    write_wins(&mut out, "With", &report.grinding.tally);
    out
}

fn write_wins(out: &mut String, qualifier: &str, tally: &CoalitionTally) {
    let _ = writeln!(
        out,
        "{} shuffle grinding, {} won {} blocks out of {} ({:.2}%)",
        qualifier,
        COALITION_LABEL,
        tally.wins,
        tally.rounds,
        tally.percentage()
    );
}

/// Machine-readable summary. Histories are left out.
pub fn render_yaml(report: &ExperimentReport) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shufflegrind_simulator::{run_experiment, ExperimentParams, NoopObserver};

    fn report() -> ExperimentReport {
        let params = ExperimentParams {
            organic_count: 8,
            coalition_count: 3,
            rounds: 10,
            seed: 2,
            ..ExperimentParams::default()
        };
        run_experiment(&params, NoopObserver).unwrap()
    }

    #[test]
    fn summary_lines() {
        let report = report();
        let text = render_summary(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Running with 8 organic validators and 3 Alice validators"
        );
        assert_eq!(lines[1], "(Alice has 27.27% of the stake)");
        assert_eq!(
            lines[2],
            format!(
                "Without shuffle grinding, Alice won {} blocks out of 10 ({:.2}%)",
                report.honest.tally.wins,
                report.honest.tally.percentage()
            )
        );
        assert!(lines[3].starts_with("With shuffle grinding, Alice won "));
        assert!(lines[3].contains(" blocks out of 10 ("));
    }

    #[test]
    fn yaml_carries_outcomes_without_history() {
        let yaml = render_yaml(&report()).unwrap();
        assert!(yaml.contains("strategy: honest"));
        assert!(yaml.contains("strategy: grinding"));
        assert!(yaml.contains("digest:"));
        assert!(!yaml.contains("history"));
    }
}

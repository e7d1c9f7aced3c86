//! ## shufflegrind-telemetry::metrics
//! **Prometheus counters per strategy**
//!
//! Rendered as the text exposition format; nothing is served over the network.

use prometheus::{IntCounterVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub blocks_produced: IntCounterVec,
    pub reshuffles_triggered: IntCounterVec,
    pub coalition_wins: IntCounterVec,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let blocks_produced = IntCounterVec::new(
            Opts::new("shufflegrind_blocks_total", "Blocks produced"),
            &["strategy"],
        )?;
        let reshuffles_triggered = IntCounterVec::new(
            Opts::new(
                "shufflegrind_reshuffles_total",
                "Reshuffles forced through membership changes",
            ),
            &["strategy"],
        )?;
        let coalition_wins = IntCounterVec::new(
            Opts::new("shufflegrind_coalition_wins_total", "Blocks won by the coalition"),
            &["strategy"],
        )?;

        registry.register(Box::new(blocks_produced.clone()))?;
        registry.register(Box::new(reshuffles_triggered.clone()))?;
        registry.register(Box::new(coalition_wins.clone()))?;

        Ok(Self {
            registry,
            blocks_produced,
            reshuffles_triggered,
            coalition_wins,
        })
    }

    /// Adds the totals of one finished run.
    pub fn record_run(&self, strategy: &str, blocks: usize, reshuffles: usize, wins: usize) {
        self.blocks_produced
            .with_label_values(&[strategy])
            .inc_by(blocks as u64);
        self.reshuffles_triggered
            .with_label_values(&[strategy])
            .inc_by(reshuffles as u64);
        self.coalition_wins
            .with_label_values(&[strategy])
            .inc_by(wins as u64);
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_per_strategy() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.record_run("honest", 100, 0, 21);
        metrics.record_run("grinding", 100, 64, 35);
        metrics.record_run("grinding", 100, 60, 33);

        assert_eq!(metrics.coalition_wins.with_label_values(&["honest"]).get(), 21);
        assert_eq!(metrics.coalition_wins.with_label_values(&["grinding"]).get(), 68);
        assert_eq!(
            metrics.reshuffles_triggered.with_label_values(&["grinding"]).get(),
            124
        );

        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("shufflegrind_blocks_total{strategy=\"grinding\"} 200"));
    }
}

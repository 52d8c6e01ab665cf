//! Prometheus metrics for the pipeline.
//!
//! Metrics are process-global and cheap to touch from the hot path; an
//! embedding application exposes them by registering against its own
//! registry via [`register_metrics`].

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

/// Derived-file runs by outcome.
pub static PIPELINE_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediaforge_pipeline_runs_total",
            "Derived-file pipeline runs",
        ),
        &["outcome"], // "completed", "partial", "failed", "skipped"
    )
    .unwrap()
});

/// Individual conversions completed, by media type.
pub static CONVERSIONS_COMPLETED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediaforge_conversions_completed_total",
            "Conversions completed",
        ),
        &["media_type"],
    )
    .unwrap()
});

/// Office bridge upload attempts by result.
pub static BRIDGE_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediaforge_bridge_attempts_total",
            "Office-to-PDF bridge upload attempts",
        ),
        &["result"], // "ok", "invalid", "exhausted"
    )
    .unwrap()
});

/// Wall-clock duration of one perform_conversions run.
pub static RUN_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediaforge_run_duration_seconds",
            "Duration of one synchronous conversion run",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["media_type"],
    )
    .unwrap()
});

/// Registers all pipeline metrics against the given registry.
pub fn register_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(PIPELINE_RUNS.clone()))?;
    registry.register(Box::new(CONVERSIONS_COMPLETED.clone()))?;
    registry.register(Box::new(BRIDGE_ATTEMPTS.clone()))?;
    registry.register(Box::new(RUN_DURATION.clone()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_against_fresh_registry() {
        let registry = Registry::new();
        register_metrics(&registry).unwrap();

        PIPELINE_RUNS.with_label_values(&["completed"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "mediaforge_pipeline_runs_total"));
    }
}

//! Prometheus metrics for simulation runs.
//!
//! All metrics follow the naming convention: `gs_<component>_<metric>_<unit>`.
//! Engine crates register their own counters in the default registry when
//! built with their `metrics` feature; [`encode_metrics`] exports both.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, linear_buckets, Encoder, Histogram, HistogramOpts, HistogramVec,
    IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Runtime registry for the simulator's own metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// Finished episodes, by attack and whether finality was reached
    pub static ref EPISODES_COMPLETED: IntCounterVec = IntCounterVec::new(
        Opts::new("gs_runtime_episodes_completed_total", "Total number of finished episodes"),
        &["attack", "finalized"]
    ).expect("metric creation failed");

    /// Environment steps executed
    pub static ref STEPS_EXECUTED: IntCounter = IntCounter::new(
        "gs_runtime_steps_executed_total",
        "Total number of environment steps"
    ).expect("metric creation failed");

    /// Mean per-step reward of each episode
    pub static ref EPISODE_REWARD: HistogramVec = HistogramVec::new(
        HistogramOpts::new("gs_runtime_episode_mean_reward", "Mean reward per episode")
            .buckets(linear_buckets(0.0, 0.1, 11).expect("valid buckets")),
        &["attack"]
    ).expect("metric creation failed");

    /// Wall-clock duration of each episode
    pub static ref EPISODE_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new("gs_runtime_episode_duration_seconds", "Time spent running one episode")
            .buckets(exponential_buckets(0.0001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register the runtime metrics with [`REGISTRY`]. Metrics that are already
/// registered are left in place, so calling this twice is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(EPISODES_COMPLETED.clone()),
        Box::new(STEPS_EXECUTED.clone()),
        Box::new(EPISODE_REWARD.clone()),
        Box::new(EPISODE_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode runtime and engine metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let mut metric_families = REGISTRY.gather();
    metric_families.extend(prometheus::gather());

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record a finished episode.
pub fn record_episode(attack: &str, finalized: bool, mean_reward: f64, steps: u64) {
    let finalized = if finalized { "true" } else { "false" };
    EPISODES_COMPLETED
        .with_label_values(&[attack, finalized])
        .inc();
    EPISODE_REWARD
        .with_label_values(&[attack])
        .observe(mean_reward);
    STEPS_EXECUTED.inc_by(steps);
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}

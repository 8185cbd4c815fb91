//! # Gasper-Sim Telemetry
//!
//! Logging and metrics for the simulator.
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, pretty or JSON
//! - **Metrics**: Prometheus counters and histograms, exported as text
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sim_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also accepted) |
//! | `GS_JSON_LOGS` | `false` | JSON formatted logs |
//! | `GS_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `GS_METRICS` | `false` | Register Prometheus metrics |
//! | `GS_SERVICE_NAME` | `gasper-sim` | Service name in the startup log |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_episode, register_metrics, HistogramTimer, EPISODES_COMPLETED,
    EPISODE_DURATION, EPISODE_REWARD, STEPS_EXECUTED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and, when enabled, metrics.
///
/// The returned guard logs shutdown when dropped; hold it for the lifetime of
/// the program.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    if config.metrics_enabled {
        register_metrics()?;
    }
    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        metrics_enabled: config.metrics_enabled,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    metrics_enabled: bool,
}

impl TelemetryGuard {
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

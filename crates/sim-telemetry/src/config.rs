//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `gs_02_finality=debug,info`
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to register the simulator's Prometheus metrics
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "gasper-sim".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: false,
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// Opt-out flag: anything but an explicit "off" value keeps it enabled.
fn enabled_unless_off(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GS_SERVICE_NAME`: Service name (default: gasper-sim)
    /// - `GS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `GS_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `GS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `GS_METRICS`: Register Prometheus metrics (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("GS_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("GS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: env::var("GS_CONSOLE_OUTPUT")
                .map(|v| enabled_unless_off(&v))
                .unwrap_or(defaults.console_output),

            json_logs: env::var("GS_JSON_LOGS")
                .map(|v| flag(&v))
                .unwrap_or(defaults.json_logs),

            metrics_enabled: env::var("GS_METRICS")
                .map(|v| flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }

    /// Override the log level, e.g. from a `--verbose` flag.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json_logs(mut self, json_logs: bool) -> Self {
        self.json_logs = json_logs;
        self
    }
}

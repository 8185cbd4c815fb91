//! # Finality Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `gs_finality_checkpoints_justified_total`
//! - `gs_finality_checkpoints_finalized_total`

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref CHECKPOINTS_JUSTIFIED: IntCounter = register_int_counter!(
        "gs_finality_checkpoints_justified_total",
        "Total number of checkpoints justified"
    )
    .expect("Failed to create CHECKPOINTS_JUSTIFIED metric");

    pub static ref CHECKPOINTS_FINALIZED: IntCounter = register_int_counter!(
        "gs_finality_checkpoints_finalized_total",
        "Total number of checkpoints finalized"
    )
    .expect("Failed to create CHECKPOINTS_FINALIZED metric");
}

#[cfg(feature = "metrics")]
pub fn record_checkpoint_justified() {
    CHECKPOINTS_JUSTIFIED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_checkpoint_finalized() {
    CHECKPOINTS_FINALIZED.inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_checkpoint_justified() {}

#[cfg(not(feature = "metrics"))]
pub fn record_checkpoint_finalized() {}

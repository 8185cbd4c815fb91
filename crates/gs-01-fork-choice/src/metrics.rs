//! # Fork-Choice Metrics
//!
//! Prometheus metrics for the block tree.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! gs-01-fork-choice = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `gs_fork_choice_blocks_inserted_total` - Blocks inserted, by visibility
//! - `gs_fork_choice_votes_recorded_total` - Votes recorded

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Blocks inserted, labeled `published` or `withheld`
    pub static ref BLOCKS_INSERTED: IntCounterVec = register_int_counter_vec!(
        "gs_fork_choice_blocks_inserted_total",
        "Total number of blocks inserted into the block tree",
        &["visibility"]
    )
    .expect("Failed to create BLOCKS_INSERTED metric");

    /// Votes recorded
    pub static ref VOTES_RECORDED: IntCounter = register_int_counter!(
        "gs_fork_choice_votes_recorded_total",
        "Total number of votes recorded in the block tree"
    )
    .expect("Failed to create VOTES_RECORDED metric");
}

/// Record an inserted block
#[cfg(feature = "metrics")]
pub fn record_block_inserted(withheld: bool) {
    let visibility = if withheld { "withheld" } else { "published" };
    BLOCKS_INSERTED.with_label_values(&[visibility]).inc();
}

/// Record a vote
#[cfg(feature = "metrics")]
pub fn record_vote() {
    VOTES_RECORDED.inc();
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_block_inserted(_withheld: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_vote() {}

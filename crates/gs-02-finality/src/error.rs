//! Error types for the Finality subsystem

use shared_types::CheckpointId;
use thiserror::Error;

/// Finality subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinalityError {
    /// Checkpoint was never registered (or the gadget was reset since)
    #[error("Unregistered checkpoint: {0}")]
    UnregisteredCheckpoint(CheckpointId),
}

/// Result type for finality operations
pub type FinalityResult<T> = Result<T, FinalityError>;

//! Error types for the fork-choice subsystem

use shared_types::{BlockId, ValidatorId};

/// Fork-choice error types
///
/// Every variant is a local precondition violation raised by the call that
/// detects it. Nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForkChoiceError {
    #[error("Unknown parent block: {0}")]
    UnknownParent(BlockId),

    #[error("Duplicate block: {0}")]
    DuplicateBlock(BlockId),

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Unknown validator: {0}")]
    UnknownValidator(ValidatorId),
}

/// Result type for fork-choice operations
pub type ForkChoiceResult<T> = Result<T, ForkChoiceError>;

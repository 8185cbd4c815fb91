//! Error types for the attack environment

use crate::config::AttackKind;
use gs_01_fork_choice::ForkChoiceError;
use gs_02_finality::FinalityError;
use thiserror::Error;

/// Attack environment errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    #[error("Fork choice error: {0}")]
    ForkChoice(#[from] ForkChoiceError),

    #[error("Finality error: {0}")]
    Finality(#[from] FinalityError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown attack kind: {0}")]
    UnknownAttackKind(String),

    #[error("Invalid {field} action code: {code}")]
    InvalidActionCode { field: &'static str, code: u8 },

    #[error("{action} is not supported by the {attack} attack")]
    UnsupportedAction {
        action: &'static str,
        attack: AttackKind,
    },

    #[error("Action for the {actual} attack sent to a {expected} environment")]
    ActionMismatch {
        expected: AttackKind,
        actual: AttackKind,
    },
}

/// Result type for environment operations
pub type EnvResult<T> = Result<T, EnvError>;

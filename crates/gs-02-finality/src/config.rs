use serde::{Deserialize, Serialize};

/// Finality configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalityConfig {
    /// Fraction of validators whose votes justify a checkpoint
    pub threshold: f64,
    /// Total validator count. Zero means "not yet known": nothing justifies.
    pub total_validators: usize,
}

impl FinalityConfig {
    pub fn with_validators(total_validators: usize) -> Self {
        Self {
            total_validators,
            ..Self::default()
        }
    }
}

impl Default for FinalityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.67,
            total_validators: 0,
        }
    }
}

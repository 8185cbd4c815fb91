//! Checkpoint entity

use serde::{Deserialize, Serialize};
use shared_types::CheckpointId;

/// Checkpoint finality state
///
/// State progression: Pending → Justified → Finalized
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CheckpointState {
    /// Registered, collecting votes
    #[default]
    Pending,
    /// Threshold reached
    Justified,
    /// Justified and followed by a later justified checkpoint
    Finalized,
}

/// A registered checkpoint and its vote tally.
///
/// Votes are counted, not stake-weighted: every vote is one unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub votes: u64,
    pub state: CheckpointState,
}

impl Checkpoint {
    /// Create a new pending checkpoint
    pub fn new(id: CheckpointId) -> Self {
        Self {
            id,
            votes: 0,
            state: CheckpointState::Pending,
        }
    }

    pub fn add_vote(&mut self) {
        self.votes = self.votes.saturating_add(1);
    }

    pub fn is_justified(&self) -> bool {
        self.state >= CheckpointState::Justified
    }

    pub fn is_finalized(&self) -> bool {
        self.state == CheckpointState::Finalized
    }

    /// Share of all validators that voted for this checkpoint.
    ///
    /// `None` while the validator count is unknown (zero).
    pub fn participation(&self, total_validators: usize) -> Option<f64> {
        (total_validators > 0).then(|| self.votes as f64 / total_validators as f64)
    }

    /// Justify this checkpoint if the threshold is met.
    /// Returns true if state changed
    pub fn try_justify(&mut self, total_validators: usize, threshold: f64) -> bool {
        let reached = self
            .participation(total_validators)
            .is_some_and(|ratio| ratio >= threshold);
        if self.state == CheckpointState::Pending && reached {
            self.state = CheckpointState::Justified;
            true
        } else {
            false
        }
    }

    /// Finalize this checkpoint. Only justified checkpoints can be finalized.
    pub fn finalize(&mut self) -> bool {
        if self.state == CheckpointState::Justified {
            self.state = CheckpointState::Finalized;
            true
        } else {
            false
        }
    }
}

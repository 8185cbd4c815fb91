//! # Checkpoint Finality Gadget
//!
//! Tracks vote tallies per registered checkpoint and derives the justified
//! and finalized sets.
//!
//! ## Update Rule
//!
//! 1. Every pending checkpoint whose `votes / total_validators` reaches the
//!    threshold becomes justified (visited in registration order, so the last
//!    one visited becomes the latest justified checkpoint).
//! 2. Of the justified checkpoints sorted by identifier, the second largest
//!    is finalized if it is not already.
//!
//! Only the second-largest justified checkpoint is ever a finalization
//! target; older justified checkpoints are never finalized retroactively.

use super::checkpoint::{Checkpoint, CheckpointState};
use crate::config::FinalityConfig;
use crate::error::{FinalityError, FinalityResult};
use crate::metrics;
use serde::{Deserialize, Serialize};
use shared_types::{CheckpointId, ValidatorId};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, trace};

/// Transitions produced by one [`FinalityGadget::update`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalityUpdate {
    pub newly_justified: Vec<CheckpointId>,
    pub newly_finalized: Option<CheckpointId>,
}

impl FinalityUpdate {
    pub fn is_empty(&self) -> bool {
        self.newly_justified.is_empty() && self.newly_finalized.is_none()
    }
}

/// Checkpoint finality gadget for one episode.
#[derive(Clone, Debug, Default)]
pub struct FinalityGadget {
    config: FinalityConfig,
    checkpoints: HashMap<CheckpointId, Checkpoint>,
    /// Registration order, used when scanning for justification
    registration_order: Vec<CheckpointId>,
    /// Justified checkpoints (finalized ones included)
    justified: BTreeSet<CheckpointId>,
    finalized: BTreeSet<CheckpointId>,
    last_justified: Option<CheckpointId>,
    last_finalized: Option<CheckpointId>,
}

impl FinalityGadget {
    pub fn new(config: FinalityConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &FinalityConfig {
        &self.config
    }

    /// Set the validator count used as the justification denominator.
    pub fn set_total_validators(&mut self, total: usize) {
        self.config.total_validators = total;
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.config.threshold = threshold;
    }

    /// Register a checkpoint. No-op if already registered.
    pub fn register(&mut self, id: CheckpointId) {
        if self.checkpoints.contains_key(&id) {
            return;
        }
        self.checkpoints.insert(id, Checkpoint::new(id));
        self.registration_order.push(id);
        trace!(checkpoint = %id, "Checkpoint registered");
    }

    /// Count one vote for `checkpoint`.
    ///
    /// Votes for unregistered checkpoints are ignored. Returns whether the
    /// vote was counted.
    pub fn vote(&mut self, validator: ValidatorId, checkpoint: CheckpointId) -> bool {
        match self.checkpoints.get_mut(&checkpoint) {
            Some(cp) => {
                cp.add_vote();
                trace!(validator = %validator, checkpoint = %checkpoint, votes = cp.votes, "Checkpoint vote");
                true
            }
            None => {
                trace!(validator = %validator, checkpoint = %checkpoint, "Vote for unregistered checkpoint ignored");
                false
            }
        }
    }

    /// Recompute justification and finalization.
    pub fn update(&mut self) -> FinalityUpdate {
        let mut outcome = FinalityUpdate::default();
        let FinalityConfig {
            threshold,
            total_validators,
        } = self.config;

        for id in &self.registration_order {
            let Some(cp) = self.checkpoints.get_mut(id) else {
                continue;
            };
            if cp.try_justify(total_validators, threshold) {
                self.justified.insert(*id);
                self.last_justified = Some(*id);
                outcome.newly_justified.push(*id);
                info!(checkpoint = %id, votes = cp.votes, total_validators, "Checkpoint justified");
                metrics::record_checkpoint_justified();
            }
        }

        let mut latest_two = self.justified.iter().rev();
        if let (Some(_latest), Some(&previous)) = (latest_two.next(), latest_two.next()) {
            if !self.finalized.contains(&previous) {
                if let Some(cp) = self.checkpoints.get_mut(&previous) {
                    cp.finalize();
                }
                self.finalized.insert(previous);
                self.last_finalized = Some(previous);
                outcome.newly_finalized = Some(previous);
                info!(checkpoint = %previous, "Checkpoint finalized");
                metrics::record_checkpoint_finalized();
            }
        }

        if !outcome.is_empty() {
            debug!(
                justified = self.justified.len(),
                finalized = self.finalized.len(),
                "Finality state updated"
            );
        }
        outcome
    }

    /// Clear all checkpoint state. Configuration is kept.
    pub fn reset(&mut self) {
        self.checkpoints.clear();
        self.registration_order.clear();
        self.justified.clear();
        self.finalized.clear();
        self.last_justified = None;
        self.last_finalized = None;
        debug!("Finality gadget reset");
    }

    // === READS ===

    /// Most recently justified checkpoint.
    pub fn last_justified(&self) -> Option<CheckpointId> {
        self.last_justified
    }

    /// Most recently finalized checkpoint.
    pub fn last_finalized(&self) -> Option<CheckpointId> {
        self.last_finalized
    }

    pub fn is_registered(&self, id: CheckpointId) -> bool {
        self.checkpoints.contains_key(&id)
    }

    pub fn is_justified(&self, id: CheckpointId) -> bool {
        self.justified.contains(&id)
    }

    pub fn is_finalized(&self, id: CheckpointId) -> bool {
        self.finalized.contains(&id)
    }

    pub fn justified(&self) -> &BTreeSet<CheckpointId> {
        &self.justified
    }

    pub fn finalized(&self) -> &BTreeSet<CheckpointId> {
        &self.finalized
    }

    pub fn state_of(&self, id: CheckpointId) -> FinalityResult<CheckpointState> {
        self.checkpoint(id).map(|cp| cp.state)
    }

    pub fn votes_for(&self, id: CheckpointId) -> FinalityResult<u64> {
        self.checkpoint(id).map(|cp| cp.votes)
    }

    pub fn checkpoint(&self, id: CheckpointId) -> FinalityResult<&Checkpoint> {
        self.checkpoints
            .get(&id)
            .ok_or(FinalityError::UnregisteredCheckpoint(id))
    }

    /// Number of registered checkpoints.
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

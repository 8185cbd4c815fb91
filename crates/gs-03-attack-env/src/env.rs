//! # Attack Environment
//!
//! Drives one episode of a selfish-mining or staircase attack. Validators
//! `0..n-1` follow the protocol; validator `n-1` is the adversary and acts
//! through [`Action`]s.
//!
//! ## Selfish step (one slot)
//!
//! 1. Advance the slot and pick its proposer round-robin
//! 2. Insert a block on the current head (or, for an adversarial
//!    `ReleaseAll`, publish every withheld block instead)
//! 3. Boost the new block and advance the block counter
//! 4. Honest validators vote for the head, re-evaluated before each vote
//! 5. The adversary votes unless it abstains
//! 6. Reward: adversary share of settled canonical credit
//!
//! ## Staircase step (one epoch)
//!
//! Same block production, then a checkpoint is registered for the new counter
//! value, votes target the head checkpoint in the finality gadget, and the
//! gadget is updated. Reward is 1.0 for every step finality is still absent.

use crate::action::{Action, AttesterAction, ProposerAction, StaircaseAction, StaircaseProposerAction};
use crate::config::{AttackKind, EnvConfig};
use crate::context::SimulationContext;
use crate::error::{EnvError, EnvResult};
use crate::observation::{proposer_for, selfish_observation, staircase_observation};
use gs_01_fork_choice::BlockTree;
use gs_02_finality::FinalityGadget;
use serde::{Deserialize, Serialize};
use shared_types::{BlockId, CheckpointId, Epoch, Slot, ValidatorId};
use tracing::{debug, info};

/// What happened during one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub head: BlockId,
    pub proposer: ValidatorId,
    /// Block inserted this step, if any
    pub proposed: Option<BlockId>,
    /// Withheld blocks published by a `ReleaseAll`
    pub released: usize,
    pub last_justified: Option<CheckpointId>,
    pub last_finalized: Option<CheckpointId>,
}

/// Result of [`AttackEnv::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Vec<f32>,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Single-episode attack environment.
#[derive(Clone, Debug)]
pub struct AttackEnv {
    config: EnvConfig,
    ctx: SimulationContext,
    slot: Slot,
    epoch: Epoch,
    block_counter: u64,
    steps: u64,
}

impl AttackEnv {
    pub fn new(config: EnvConfig) -> EnvResult<Self> {
        config.validate()?;
        let ctx = SimulationContext::new(&config);
        Ok(Self {
            config,
            ctx,
            slot: 0,
            epoch: 0,
            block_counter: 1,
            steps: 0,
        })
    }

    /// Start a fresh episode and return its first observation.
    pub fn reset(&mut self) -> Vec<f32> {
        self.ctx.reset(&self.config);
        self.slot = 0;
        self.epoch = 0;
        self.block_counter = 1;
        self.steps = 0;
        debug!(attack = %self.config.attack, validators = self.config.num_validators, "[gs-03] Episode reset");
        self.observation()
    }

    pub fn step(&mut self, action: Action) -> EnvResult<StepOutcome> {
        if action.kind() != self.config.attack {
            return Err(EnvError::ActionMismatch {
                expected: self.config.attack,
                actual: action.kind(),
            });
        }

        let (info, reward) = match self.config.attack {
            AttackKind::Selfish => self.step_selfish(action)?,
            AttackKind::Staircase => self.step_staircase(action)?,
        };

        self.steps += 1;
        let done = self
            .config
            .episode_length
            .is_some_and(|length| self.steps >= length);

        debug!(
            step = self.steps,
            proposer = %info.proposer,
            head = %info.head,
            reward,
            "[gs-03] Step complete"
        );
        if done {
            info!(steps = self.steps, head = %info.head, "[gs-03] Episode finished");
        }

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            done,
            info,
        })
    }

    fn step_selfish(&mut self, action: Action) -> EnvResult<(StepInfo, f64)> {
        self.slot += 1;
        let proposer = proposer_for(self.slot, self.config.num_validators);
        let adversary = self.adversary();
        let parent = self.ctx.tree.head();
        let block_id = BlockId::new(self.block_counter);

        let mut released = 0;
        let withheld = if proposer == adversary {
            match action.proposer() {
                ProposerAction::Publish => Some(false),
                ProposerAction::Withhold => Some(true),
                ProposerAction::ReleaseAll => {
                    released = self.ctx.tree.release_withheld(adversary);
                    None
                }
            }
        } else {
            Some(false)
        };

        let proposed = match withheld {
            Some(withheld) => {
                self.ctx
                    .tree
                    .insert_block(block_id, parent, proposer, withheld, self.slot)?;
                self.boost(block_id)?;
                Some(block_id)
            }
            None => None,
        };
        self.block_counter += 1;

        for validator in self.honest_validators() {
            let head = self.ctx.tree.head();
            self.ctx.tree.record_vote(validator, head)?;
        }
        if action.attester() == AttesterAction::Vote {
            let head = self.ctx.tree.head();
            self.ctx.tree.record_vote(adversary, head)?;
        }

        let reward = self.ctx.tree.compute_selfish_reward(adversary).adversary_share();
        let info = StepInfo {
            head: self.ctx.tree.head(),
            proposer,
            proposed,
            released,
            last_justified: None,
            last_finalized: None,
        };
        Ok((info, reward))
    }

    fn step_staircase(&mut self, action: Action) -> EnvResult<(StepInfo, f64)> {
        let withhold = match action {
            Action::Staircase(StaircaseAction { proposer, .. }) => {
                proposer == StaircaseProposerAction::Withhold
            }
            Action::Selfish(_) => {
                return Err(EnvError::ActionMismatch {
                    expected: AttackKind::Staircase,
                    actual: AttackKind::Selfish,
                })
            }
        };

        self.epoch += 1;
        let proposer = proposer_for(self.epoch, self.config.num_validators);
        let adversary = self.adversary();
        let parent = self.ctx.tree.head();
        let block_id = BlockId::new(self.block_counter);
        let withheld = proposer == adversary && withhold;

        self.ctx
            .tree
            .insert_block(block_id, parent, proposer, withheld, self.epoch)?;
        self.boost(block_id)?;
        self.block_counter += 1;

        let head = self.ctx.tree.head();
        let target = CheckpointId::from(head);
        let checkpoint = CheckpointId::new(self.block_counter);
        let honest: Vec<ValidatorId> = self.honest_validators().collect();

        let gadget = self.gadget_mut()?;
        gadget.register(checkpoint);
        for validator in honest {
            gadget.vote(validator, target);
        }
        if action.attester() == AttesterAction::Vote {
            gadget.vote(adversary, target);
        }
        gadget.update();

        let reward = if gadget.last_finalized().is_none() { 1.0 } else { 0.0 };
        let info = StepInfo {
            head,
            proposer,
            proposed: Some(block_id),
            released: 0,
            last_justified: gadget.last_justified(),
            last_finalized: gadget.last_finalized(),
        };
        Ok((info, reward))
    }

    fn boost(&mut self, block_id: BlockId) -> EnvResult<()> {
        if self.config.transient_boost {
            self.ctx.tree.clear_proposer_boost();
        }
        self.ctx.tree.apply_proposer_boost(block_id)?;
        Ok(())
    }

    fn gadget_mut(&mut self) -> EnvResult<&mut FinalityGadget> {
        self.ctx.gadget.as_mut().ok_or_else(|| {
            EnvError::InvalidConfig("staircase episode without a finality gadget".to_string())
        })
    }

    fn honest_validators(&self) -> impl Iterator<Item = ValidatorId> {
        (0..self.config.num_validators - 1).map(ValidatorId::new)
    }

    pub fn observation(&self) -> Vec<f32> {
        let adversary = self.adversary();
        match (&self.config.attack, &self.ctx.gadget) {
            (AttackKind::Staircase, Some(gadget)) => staircase_observation(
                &self.ctx.tree,
                gadget,
                self.epoch,
                self.config.staircase_lookahead,
                adversary,
            ),
            _ => selfish_observation(
                &self.ctx.tree,
                self.slot,
                self.config.selfish_lookahead,
                adversary,
            ),
        }
    }

    /// Length of the observation vector for this environment.
    pub fn observation_len(&self) -> usize {
        match self.config.attack {
            AttackKind::Selfish => self.config.selfish_lookahead + 2,
            AttackKind::Staircase => self.config.staircase_lookahead + 3,
        }
    }

    pub fn adversary(&self) -> ValidatorId {
        ValidatorId::new(self.config.num_validators - 1)
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn tree(&self) -> &BlockTree {
        &self.ctx.tree
    }

    pub fn gadget(&self) -> Option<&FinalityGadget> {
        self.ctx.gadget.as_ref()
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

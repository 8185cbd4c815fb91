//! # Canonical-Chain Reward Attribution
//!
//! Credits validators for the support they gave to settled canonical blocks.
//!
//! A block is settled once it is more than [`SETTLEMENT_DEPTH`] blocks below
//! the head. For every supporting validator of a settled block:
//!
//! | Vote timing                           | Validator      | Proposer              |
//! |---------------------------------------|----------------|-----------------------|
//! | vote target slot + 1 == block slot    | 1.0            | 1/8                   |
//! | anything else                         | 40/54          | 1/8 × 40/54           |

use super::block_tree::BlockTree;
use super::fork_choice::ForkChoiceEngine;
use serde::{Deserialize, Serialize};
use shared_types::ValidatorId;
use std::collections::BTreeMap;

/// Most recent canonical blocks that earn nothing yet.
pub const SETTLEMENT_DEPTH: usize = 8;

/// Credit for a vote landing exactly one slot before the block.
pub const TIMELY_VOTE_CREDIT: f64 = 1.0;

/// Credit for any other vote.
pub const LATE_VOTE_CREDIT: f64 = 40.0 / 54.0;

/// Fraction of each vote credit paid to the block's proposer.
pub const PROPOSER_SHARE: f64 = 1.0 / 8.0;

/// Per-validator reward credit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    adversary: ValidatorId,
    credits: BTreeMap<ValidatorId, f64>,
}

impl RewardBreakdown {
    pub fn new(adversary: ValidatorId) -> Self {
        Self {
            adversary,
            credits: BTreeMap::new(),
        }
    }

    fn credit(&mut self, validator: ValidatorId, amount: f64) {
        *self.credits.entry(validator).or_insert(0.0) += amount;
    }

    pub fn adversary(&self) -> ValidatorId {
        self.adversary
    }

    /// Credit of one validator; zero when it earned nothing.
    pub fn credit_of(&self, validator: ValidatorId) -> f64 {
        self.credits.get(&validator).copied().unwrap_or(0.0)
    }

    pub fn credits(&self) -> &BTreeMap<ValidatorId, f64> {
        &self.credits
    }

    pub fn total(&self) -> f64 {
        self.credits.values().sum()
    }

    /// Adversary credit relative to everyone's; zero when nothing is settled.
    pub fn adversary_share(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.credit_of(self.adversary) / total
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }
}

impl BlockTree {
    /// Attribute reward credit across the settled part of the canonical chain.
    pub fn compute_selfish_reward(&self, adversary: ValidatorId) -> RewardBreakdown {
        let mut rewards = RewardBreakdown::new(adversary);

        // Genesis earns nothing
        let chain = ForkChoiceEngine::new(self).canonical_chain();
        let chain = &chain[1..];
        let settled = chain.len().saturating_sub(SETTLEMENT_DEPTH);

        for block in chain[..settled].iter().filter_map(|&id| self.block(id)) {
            for &voter in block.votes() {
                let Some(vote_slot) = self
                    .validator(voter)
                    .and_then(|v| self.block(v.latest_vote()))
                    .map(|target| target.slot())
                else {
                    continue;
                };

                let credit = if vote_slot + 1 == block.slot() {
                    TIMELY_VOTE_CREDIT
                } else {
                    LATE_VOTE_CREDIT
                };
                rewards.credit(voter, credit);
                if let Some(proposer) = block.proposer() {
                    rewards.credit(proposer, PROPOSER_SHARE * credit);
                }
            }
        }

        rewards
    }
}

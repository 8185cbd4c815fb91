//! Fork-choice configuration

use serde::{Deserialize, Serialize};
use shared_types::{Stake, Weight};

/// How a validator's stake is accounted when it votes again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoteAccounting {
    /// Every vote adds the validator's stake along the target's ancestry and
    /// nothing is ever retracted. Blocks keep weight from validators that
    /// have since moved on.
    #[default]
    Cumulative,
    /// Latest-message accounting: the stake added by the validator's previous
    /// vote is subtracted (and the validator leaves that block's support set)
    /// before the new vote is applied.
    LatestMessage,
}

/// What happens to an outstanding boost when a new block is boosted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoostReplacement {
    /// The boost record moves to the new block; the old boost's weight stays
    /// on the old ancestry and can no longer be cleared.
    #[default]
    KeepPrevious,
    /// The previous boost is cleared before the new one is applied.
    ClearPrevious,
}

/// Fork-choice configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForkChoiceConfig {
    /// Weight budget of one slot. Proposer boost is derived from it.
    pub weight_per_slot: Weight,
    /// Fraction of `weight_per_slot` granted as proposer boost
    pub proposer_boost_ratio: Weight,
    /// Stake assigned to every validator at construction
    pub default_stake: Stake,
    pub vote_accounting: VoteAccounting,
    pub boost_replacement: BoostReplacement,
}

impl ForkChoiceConfig {
    /// Weight added along the boosted block's ancestry.
    pub fn proposer_boost(&self) -> Weight {
        self.proposer_boost_ratio * self.weight_per_slot
    }
}

impl Default for ForkChoiceConfig {
    fn default() -> Self {
        Self {
            weight_per_slot: 2.0,
            proposer_boost_ratio: 0.4,
            default_stake: 1,
            vote_accounting: VoteAccounting::Cumulative,
            boost_replacement: BoostReplacement::KeepPrevious,
        }
    }
}

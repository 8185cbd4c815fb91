//! Domain layer for the fork-choice subsystem
//!
//! - block / validator: arena records
//! - block_tree: insertion, votes, proposer boost
//! - fork_choice: LMD-GHOST style head selection
//! - reward: canonical-chain reward attribution

mod block;
mod block_tree;
mod config;
mod error;
mod fork_choice;
mod reward;
mod validator;

pub use block::Block;
pub use block_tree::BlockTree;
pub use config::{BoostReplacement, ForkChoiceConfig, VoteAccounting};
pub use error::{ForkChoiceError, ForkChoiceResult};
pub use fork_choice::ForkChoiceEngine;
pub use reward::{
    RewardBreakdown, LATE_VOTE_CREDIT, PROPOSER_SHARE, SETTLEMENT_DEPTH, TIMELY_VOTE_CREDIT,
};
pub use validator::{Validator, ValidatorRegistry};

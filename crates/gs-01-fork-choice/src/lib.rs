//! # gs-01-fork-choice
//!
//! Block tree, vote ledger and fork choice for the Gasper simulator.
//!
//! ## Architecture
//!
//! Blocks live in an arena owned by [`BlockTree`]; identifiers are mapped to
//! arena indices only at the API boundary. Each vote adds the validator's
//! stake to every block from the target up to genesis, and proposer boost
//! adds `0.4 × weight_per_slot` along the boosted block's ancestry.
//!
//! [`ForkChoiceEngine`] walks the tree from genesis, descending into the
//! visible child with the largest `(weight, id)` pair at every level.
//! Withheld blocks exist and aggregate weight but are never traversed.
//!
//! ```text
//!   genesis (w=3.8)
//!    ├── 1 (w=1)
//!    └── 2 (w=2.8, boosted) ──→ head
//!         └── 3 (withheld, w=0)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gs_01_fork_choice::{BlockTree, ForkChoiceConfig};
//! use shared_types::{BlockId, ValidatorId};
//!
//! let mut tree = BlockTree::new(4, ForkChoiceConfig::default());
//! tree.insert_block(BlockId::new(1), BlockId::GENESIS, ValidatorId::new(1), false, 1)?;
//! tree.record_vote(ValidatorId::new(0), BlockId::new(1))?;
//! assert_eq!(tree.head(), BlockId::new(1));
//! # Ok::<(), gs_01_fork_choice::ForkChoiceError>(())
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded by construction: a tree belongs to exactly one episode.
//! Parallel episodes each own their own tree.

pub mod domain;
pub mod metrics;

// Re-export main types
pub use domain::{
    Block, BlockTree, BoostReplacement, ForkChoiceConfig, ForkChoiceEngine, ForkChoiceError,
    ForkChoiceResult, RewardBreakdown, Validator, ValidatorRegistry, VoteAccounting,
    SETTLEMENT_DEPTH,
};

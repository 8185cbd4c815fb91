//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Chain**: `BlockId`, `Slot`, `Epoch`
//! - **Consensus & Finality**: `ValidatorId`, `Stake`, `Weight`, `CheckpointId`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Slot number (one block proposal opportunity).
pub type Slot = u64;

/// Epoch number (one checkpoint opportunity).
pub type Epoch = u64;

/// Opaque block identifier.
///
/// Identifiers are compared numerically when fork choice breaks weight ties,
/// so the larger identifier wins. `BlockId::GENESIS` is reserved for the root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Reserved identifier of the genesis block.
    pub const GENESIS: Self = Self(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_genesis(self) -> bool {
        self == Self::GENESIS
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_genesis() {
            f.write_str("genesis")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// =============================================================================
// CLUSTER B: CONSENSUS & FINALITY
// =============================================================================

/// Stake held by a single validator.
pub type Stake = u64;

/// Accumulated fork-choice weight. Real-valued because proposer boost is a
/// fractional multiple of the per-slot weight.
pub type Weight = f64;

/// Validator identifier. Validators are numbered densely from zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ValidatorId(pub usize);

impl ValidatorId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this validator in a dense registry.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ValidatorId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Checkpoint identifier, totally ordered by its numeric value.
///
/// The attack environment derives checkpoint identifiers from block
/// identifiers, hence the `From<BlockId>` conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct CheckpointId(pub u64);

impl CheckpointId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for CheckpointId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<BlockId> for CheckpointId {
    fn from(block: BlockId) -> Self {
        Self(block.0)
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp{}", self.0)
    }
}

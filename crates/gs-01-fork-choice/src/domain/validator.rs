//! Validator registry

use super::block::BlockIndex;
use serde::{Deserialize, Serialize};
use shared_types::{BlockId, Stake, ValidatorId};

/// A validator known to the tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Validator {
    pub(crate) id: ValidatorId,
    pub(crate) stake: Stake,
    pub(crate) latest_vote: BlockId,
    /// Block whose ancestry currently carries this validator's stake
    /// (latest-message accounting only).
    #[serde(skip)]
    pub(crate) contribution: Option<BlockIndex>,
}

impl Validator {
    pub(crate) fn new(id: ValidatorId, stake: Stake, genesis: BlockId) -> Self {
        Self {
            id,
            stake,
            latest_vote: genesis,
            contribution: None,
        }
    }

    pub fn id(&self) -> ValidatorId {
        self.id
    }

    pub fn stake(&self) -> Stake {
        self.stake
    }

    /// Current vote target. Every validator starts out pointing at genesis.
    pub fn latest_vote(&self) -> BlockId {
        self.latest_vote
    }
}

/// Dense validator array indexed by `ValidatorId`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidatorRegistry {
    validators: Vec<Validator>,
}

impl ValidatorRegistry {
    pub fn new(count: usize, stake: Stake, genesis: BlockId) -> Self {
        let validators = (0..count)
            .map(|i| Validator::new(ValidatorId::new(i), stake, genesis))
            .collect();
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn contains(&self, id: ValidatorId) -> bool {
        id.index() < self.validators.len()
    }

    pub fn get(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ValidatorId) -> Option<&mut Validator> {
        self.validators.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter()
    }

    pub fn total_stake(&self) -> Stake {
        self.validators.iter().map(|v| v.stake).sum()
    }
}

//! # Adversary Actions
//!
//! Agents emit small integer codes; they are decoded into these enums once,
//! at the boundary, and every step handles the variants exhaustively.
//!
//! | Field    | Code | Meaning                                   |
//! |----------|------|-------------------------------------------|
//! | proposer | 0    | publish the block                         |
//! | proposer | 1    | withhold the block                        |
//! | proposer | 2    | release every withheld block (selfish)    |
//! | attester | 0    | vote for the current head                 |
//! | attester | 1    | abstain                                   |

use crate::config::AttackKind;
use crate::error::{EnvError, EnvResult};
use serde::{Deserialize, Serialize};

/// What the adversary does when it is the slot's proposer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposerAction {
    Publish,
    Withhold,
    /// Publish all previously withheld blocks instead of proposing.
    ReleaseAll,
}

impl ProposerAction {
    pub const ALL: [ProposerAction; 3] = [
        ProposerAction::Publish,
        ProposerAction::Withhold,
        ProposerAction::ReleaseAll,
    ];

    pub fn code(self) -> u8 {
        match self {
            ProposerAction::Publish => 0,
            ProposerAction::Withhold => 1,
            ProposerAction::ReleaseAll => 2,
        }
    }
}

impl TryFrom<u8> for ProposerAction {
    type Error = EnvError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProposerAction::Publish),
            1 => Ok(ProposerAction::Withhold),
            2 => Ok(ProposerAction::ReleaseAll),
            code => Err(EnvError::InvalidActionCode {
                field: "proposer",
                code,
            }),
        }
    }
}

/// Whether the adversary casts its vote this step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttesterAction {
    Vote,
    Abstain,
}

impl AttesterAction {
    pub const ALL: [AttesterAction; 2] = [AttesterAction::Vote, AttesterAction::Abstain];

    pub fn code(self) -> u8 {
        match self {
            AttesterAction::Vote => 0,
            AttesterAction::Abstain => 1,
        }
    }
}

impl TryFrom<u8> for AttesterAction {
    type Error = EnvError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AttesterAction::Vote),
            1 => Ok(AttesterAction::Abstain),
            code => Err(EnvError::InvalidActionCode {
                field: "attester",
                code,
            }),
        }
    }
}

/// What the adversary does when it proposes an epoch's block. There is no
/// release: staircase blocks are withheld for good.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaircaseProposerAction {
    Publish,
    Withhold,
}

impl From<StaircaseProposerAction> for ProposerAction {
    fn from(action: StaircaseProposerAction) -> Self {
        match action {
            StaircaseProposerAction::Publish => ProposerAction::Publish,
            StaircaseProposerAction::Withhold => ProposerAction::Withhold,
        }
    }
}

impl TryFrom<ProposerAction> for StaircaseProposerAction {
    type Error = EnvError;

    fn try_from(action: ProposerAction) -> Result<Self, Self::Error> {
        match action {
            ProposerAction::Publish => Ok(StaircaseProposerAction::Publish),
            ProposerAction::Withhold => Ok(StaircaseProposerAction::Withhold),
            ProposerAction::ReleaseAll => Err(EnvError::UnsupportedAction {
                action: "ReleaseAll",
                attack: AttackKind::Staircase,
            }),
        }
    }
}

/// Selfish-mining action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelfishAction {
    pub proposer: ProposerAction,
    pub attester: AttesterAction,
}

/// Staircase action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaircaseAction {
    pub proposer: StaircaseProposerAction,
    pub attester: AttesterAction,
}

/// Action for either environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Selfish(SelfishAction),
    Staircase(StaircaseAction),
}

impl Action {
    pub fn selfish(proposer: ProposerAction, attester: AttesterAction) -> Self {
        Action::Selfish(SelfishAction { proposer, attester })
    }

    pub fn staircase(proposer: StaircaseProposerAction, attester: AttesterAction) -> Self {
        Action::Staircase(StaircaseAction { proposer, attester })
    }

    /// Honest behaviour: publish and vote.
    pub fn honest(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Selfish => Self::selfish(ProposerAction::Publish, AttesterAction::Vote),
            AttackKind::Staircase => {
                Self::staircase(StaircaseProposerAction::Publish, AttesterAction::Vote)
            }
        }
    }

    /// Build an action for `kind`. Fails for `ReleaseAll` in the staircase attack.
    pub fn new(
        kind: AttackKind,
        proposer: ProposerAction,
        attester: AttesterAction,
    ) -> EnvResult<Self> {
        match kind {
            AttackKind::Selfish => Ok(Self::selfish(proposer, attester)),
            AttackKind::Staircase => Ok(Self::staircase(proposer.try_into()?, attester)),
        }
    }

    /// Decode a `(proposer, attester)` code pair.
    pub fn decode(kind: AttackKind, proposer: u8, attester: u8) -> EnvResult<Self> {
        let proposer = ProposerAction::try_from(proposer)?;
        let attester = AttesterAction::try_from(attester)?;
        Self::new(kind, proposer, attester)
    }

    /// Every valid action of an attack, in code order.
    pub fn all(kind: AttackKind) -> Vec<Action> {
        ProposerAction::ALL
            .iter()
            .flat_map(|&p| AttesterAction::ALL.iter().map(move |&a| (p, a)))
            .filter_map(|(p, a)| Self::new(kind, p, a).ok())
            .collect()
    }

    pub fn kind(&self) -> AttackKind {
        match self {
            Action::Selfish(_) => AttackKind::Selfish,
            Action::Staircase(_) => AttackKind::Staircase,
        }
    }

    pub fn proposer(&self) -> ProposerAction {
        match self {
            Action::Selfish(a) => a.proposer,
            Action::Staircase(a) => a.proposer.into(),
        }
    }

    pub fn attester(&self) -> AttesterAction {
        match self {
            Action::Selfish(a) => a.attester,
            Action::Staircase(a) => a.attester,
        }
    }
}

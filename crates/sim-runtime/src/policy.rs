//! Fixed adversary policies used to drive episodes.

use gs_03_attack_env::{
    Action, AttackKind, AttesterAction, EnvError, ProposerAction, StaircaseProposerAction,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chooses the adversary's action from the latest observation.
pub trait Policy: Send {
    fn act(&mut self, observation: &[f32]) -> Action;
}

/// Publish every block and always vote.
#[derive(Debug, Clone, Copy)]
pub struct HonestPolicy {
    attack: AttackKind,
}

impl Policy for HonestPolicy {
    fn act(&mut self, _observation: &[f32]) -> Action {
        Action::honest(self.attack)
    }
}

/// Uniformly random valid action, seeded for reproducible episodes.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    attack: AttackKind,
    actions: Vec<Action>,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(attack: AttackKind, seed: u64) -> Self {
        Self {
            attack,
            actions: Action::all(attack),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &[f32]) -> Action {
        self.actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| Action::honest(self.attack))
    }
}

/// Withhold every block and never vote.
#[derive(Debug, Clone, Copy)]
pub struct WithholdingPolicy {
    attack: AttackKind,
}

impl Policy for WithholdingPolicy {
    fn act(&mut self, _observation: &[f32]) -> Action {
        match self.attack {
            AttackKind::Selfish => Action::selfish(ProposerAction::Withhold, AttesterAction::Abstain),
            AttackKind::Staircase => {
                Action::staircase(StaircaseProposerAction::Withhold, AttesterAction::Abstain)
            }
        }
    }
}

/// Policy selector for the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Honest,
    Random,
    Withholding,
}

impl PolicyKind {
    /// Build a fresh policy for one episode.
    pub fn build(self, attack: AttackKind, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Honest => Box::new(HonestPolicy { attack }),
            PolicyKind::Random => Box::new(RandomPolicy::new(attack, seed)),
            PolicyKind::Withholding => Box::new(WithholdingPolicy { attack }),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Honest => f.write_str("honest"),
            PolicyKind::Random => f.write_str("random"),
            PolicyKind::Withholding => f.write_str("withholding"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "honest" => Ok(PolicyKind::Honest),
            "random" => Ok(PolicyKind::Random),
            "withholding" | "withhold" => Ok(PolicyKind::Withholding),
            other => Err(EnvError::InvalidConfig(format!("unknown policy: {other}"))),
        }
    }
}

//! Environment configuration

use crate::error::EnvError;
use gs_01_fork_choice::ForkChoiceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attack scenario driven by the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    /// Withhold blocks to win forks; one block per slot.
    #[default]
    Selfish,
    /// Manipulate justification timing; one block and checkpoint per epoch.
    Staircase,
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackKind::Selfish => f.write_str("selfish"),
            AttackKind::Staircase => f.write_str("staircase"),
        }
    }
}

impl FromStr for AttackKind {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "selfish" => Ok(AttackKind::Selfish),
            "staircase" => Ok(AttackKind::Staircase),
            other => Err(EnvError::UnknownAttackKind(other.to_string())),
        }
    }
}

/// Environment configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Validators in the episode; the last one is the adversary
    pub num_validators: usize,
    pub attack: AttackKind,
    pub fork_choice: ForkChoiceConfig,
    /// Justification threshold of the finality gadget (staircase only)
    pub justification_threshold: f64,
    /// Upcoming slots covered by the selfish observation
    pub selfish_lookahead: usize,
    /// Upcoming epochs covered by the staircase observation
    pub staircase_lookahead: usize,
    /// Steps per episode; `None` never ends an episode
    pub episode_length: Option<u64>,
    /// Clear the previous proposer boost before boosting the new block.
    /// Off by default: every boost stays on its block's ancestry.
    pub transient_boost: bool,
}

impl EnvConfig {
    pub fn new(attack: AttackKind, num_validators: usize) -> Self {
        Self {
            attack,
            num_validators,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if self.num_validators == 0 {
            return Err(EnvError::InvalidConfig(
                "at least one validator is required".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.justification_threshold) {
            return Err(EnvError::InvalidConfig(format!(
                "justification threshold {} outside [0, 1]",
                self.justification_threshold
            )));
        }
        Ok(())
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            num_validators: 128,
            attack: AttackKind::Selfish,
            fork_choice: ForkChoiceConfig::default(),
            justification_threshold: 0.67,
            selfish_lookahead: 8,
            staircase_lookahead: 64,
            episode_length: None,
            transient_boost: false,
        }
    }
}

//! # Attack Environments
//!
//! Step-driven selfish-mining and staircase attack episodes on top of the
//! fork-choice ([`gs_01_fork_choice`]) and finality ([`gs_02_finality`])
//! engines.
//!
//! ```
//! use gs_03_attack_env::{Action, AttackEnv, AttackKind, EnvConfig};
//!
//! let mut env = AttackEnv::new(EnvConfig::new(AttackKind::Selfish, 16)).unwrap();
//! let observation = env.reset();
//! assert_eq!(observation.len(), 10);
//!
//! let outcome = env.step(Action::decode(AttackKind::Selfish, 0, 0).unwrap()).unwrap();
//! assert!(outcome.reward >= 0.0);
//! ```

pub mod action;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod observation;

pub use action::{
    Action, AttesterAction, ProposerAction, SelfishAction, StaircaseAction, StaircaseProposerAction,
};
pub use config::{AttackKind, EnvConfig};
pub use context::SimulationContext;
pub use env::{AttackEnv, StepInfo, StepOutcome};
pub use error::{EnvError, EnvResult};

//! # Gasper-Sim Runtime
//!
//! Library half of the `gasper-sim` binary: adversary policies and the
//! parallel episode runner.

pub mod policy;
pub mod runner;

pub use policy::{HonestPolicy, Policy, PolicyKind, RandomPolicy, WithholdingPolicy};
pub use runner::{run, run_episode, EpisodeSummary, RunConfig, RunSummary};

//! # Episode Runner
//!
//! Runs `episodes` independent episodes of `steps` steps each. Every episode
//! owns its own [`AttackEnv`] (and so its own block tree and finality
//! gadget), which lets episodes run in parallel on the rayon pool.

use crate::policy::PolicyKind;
use gs_03_attack_env::{AttackEnv, AttackKind, EnvConfig, EnvError, EnvResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{BlockId, CheckpointId};
use sim_telemetry::{record_episode, EPISODE_DURATION};
use tracing::{debug, info};

/// Run configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    pub env: EnvConfig,
    pub episodes: usize,
    pub steps: u64,
    pub policy: PolicyKind,
    /// Base seed; episode `i` uses `seed + i`
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            episodes: 1,
            steps: 256,
            policy: PolicyKind::Honest,
            seed: 0,
        }
    }
}

/// Outcome of one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub steps: u64,
    pub total_reward: f64,
    pub mean_reward: f64,
    pub head: BlockId,
    pub canonical_length: usize,
    pub blocks: usize,
    pub withheld_blocks: usize,
    pub last_justified: Option<CheckpointId>,
    pub last_finalized: Option<CheckpointId>,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub attack: AttackKind,
    pub policy: PolicyKind,
    pub validators: usize,
    pub episodes: Vec<EpisodeSummary>,
    pub mean_reward: f64,
    /// Episodes that ended with at least one finalized checkpoint
    pub finalized_episodes: usize,
}

/// Run one episode to completion.
pub fn run_episode(config: &RunConfig, episode: usize) -> EnvResult<EpisodeSummary> {
    let _timer = sim_telemetry::time_histogram!(EPISODE_DURATION);

    let env_config = EnvConfig {
        episode_length: Some(config.steps),
        ..config.env.clone()
    };
    let attack = env_config.attack;
    let mut env = AttackEnv::new(env_config)?;
    let mut policy = config
        .policy
        .build(attack, config.seed.wrapping_add(episode as u64));

    let mut observation = env.reset();
    let mut total_reward = 0.0;
    let mut last = None;

    for _ in 0..config.steps {
        let action = policy.act(&observation);
        let outcome = env.step(action)?;
        total_reward += outcome.reward;
        observation = outcome.observation;
        let done = outcome.done;
        last = Some(outcome.info);
        if done {
            break;
        }
    }

    let steps = env.steps();
    let mean_reward = if steps > 0 {
        total_reward / steps as f64
    } else {
        0.0
    };
    let tree = env.tree();
    let summary = EpisodeSummary {
        episode,
        steps,
        total_reward,
        mean_reward,
        head: tree.head(),
        canonical_length: gs_01_fork_choice::ForkChoiceEngine::new(tree)
            .canonical_chain()
            .len(),
        blocks: tree.len(),
        withheld_blocks: tree.blocks().filter(|b| b.is_withheld()).count(),
        last_justified: last.as_ref().and_then(|info| info.last_justified),
        last_finalized: last.as_ref().and_then(|info| info.last_finalized),
    };

    record_episode(
        &attack.to_string(),
        summary.last_finalized.is_some(),
        mean_reward,
        steps,
    );
    debug!(
        episode,
        steps,
        mean_reward,
        head = %summary.head,
        "[runtime] Episode complete"
    );
    Ok(summary)
}

/// Run every episode of `config` in parallel.
pub fn run(config: &RunConfig) -> EnvResult<RunSummary> {
    config.env.validate()?;
    if config.episodes == 0 {
        return Err(EnvError::InvalidConfig(
            "at least one episode is required".to_string(),
        ));
    }

    info!(
        attack = %config.env.attack,
        policy = %config.policy,
        validators = config.env.num_validators,
        episodes = config.episodes,
        steps = config.steps,
        "[runtime] Starting run"
    );

    let episodes = (0..config.episodes)
        .into_par_iter()
        .map(|episode| run_episode(config, episode))
        .collect::<EnvResult<Vec<_>>>()?;

    let mean_reward =
        episodes.iter().map(|e| e.mean_reward).sum::<f64>() / episodes.len() as f64;
    let finalized_episodes = episodes
        .iter()
        .filter(|e| e.last_finalized.is_some())
        .count();

    Ok(RunSummary {
        attack: config.env.attack,
        policy: config.policy,
        validators: config.env.num_validators,
        episodes,
        mean_reward,
        finalized_episodes,
    })
}

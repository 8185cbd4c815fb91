//! # Gasper-Sim
//!
//! Runs selfish-mining or staircase attack episodes against the fork-choice
//! and finality engines and reports how the adversary fared.
//!
//! ```text
//! gasper-sim --attack staircase --validators 64 --episodes 8 --policy random --json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gs_03_attack_env::{AttackKind, EnvConfig};
use sim_runtime::{run, PolicyKind, RunConfig, RunSummary};
use sim_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

/// Gasper-Sim: proof-of-stake attack simulator
#[derive(Parser, Debug)]
#[command(name = "gasper-sim")]
#[command(about = "Run fork-choice and finality attack episodes")]
struct Args {
    /// Attack scenario (selfish, staircase)
    #[arg(short, long, default_value = "selfish")]
    attack: AttackKind,

    /// Number of validators; the last one is the adversary
    #[arg(short, long, default_value = "128")]
    validators: usize,

    /// Episodes to run
    #[arg(short, long, default_value = "4")]
    episodes: usize,

    /// Steps (slots or epochs) per episode
    #[arg(short, long, default_value = "256")]
    steps: u64,

    /// Adversary policy (honest, random, withholding)
    #[arg(short, long, default_value = "honest")]
    policy: PolicyKind,

    /// Base seed for random policies
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Justification threshold of the finality gadget
    #[arg(long, default_value = "0.67")]
    threshold: f64,

    /// Clear the previous proposer boost before boosting a new block
    #[arg(long)]
    transient_boost: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    metrics: bool,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    telemetry.metrics_enabled |= args.metrics;
    let _guard = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Gasper-Sim v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = RunConfig {
        env: EnvConfig {
            justification_threshold: args.threshold,
            transient_boost: args.transient_boost,
            ..EnvConfig::new(args.attack, args.validators)
        },
        episodes: args.episodes,
        steps: args.steps,
        policy: args.policy,
        seed: args.seed,
    };

    let summary = run(&config).context("Simulation run failed")?;
    report(&summary);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{json}");
    }
    if args.metrics {
        print!("{}", encode_metrics().context("Failed to encode metrics")?);
    }
    Ok(())
}

fn report(summary: &RunSummary) {
    for episode in &summary.episodes {
        info!(
            episode = episode.episode,
            mean_reward = episode.mean_reward,
            head = %episode.head,
            canonical_length = episode.canonical_length,
            withheld = episode.withheld_blocks,
            justified = ?episode.last_justified,
            finalized = ?episode.last_finalized,
            "Episode result"
        );
    }
    info!(
        attack = %summary.attack,
        policy = %summary.policy,
        mean_reward = summary.mean_reward,
        finalized_episodes = summary.finalized_episodes,
        "Run complete"
    );
}

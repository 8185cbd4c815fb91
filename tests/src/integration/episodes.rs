//! # Episode Flows
//!
//! Whole selfish and staircase episodes driven through the attack
//! environment and the runtime's parallel runner.

#[cfg(test)]
mod tests {
    use gs_01_fork_choice::{ForkChoiceConfig, ForkChoiceEngine};
    use gs_03_attack_env::{
        Action, AttackEnv, AttackKind, AttesterAction, EnvConfig, EnvError, ProposerAction,
        StaircaseProposerAction,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::{BlockId, ValidatorId};
    use sim_runtime::{run, PolicyKind, RunConfig};

    fn env(attack: AttackKind, validators: usize) -> AttackEnv {
        let mut env = AttackEnv::new(EnvConfig::new(attack, validators)).unwrap();
        env.reset();
        env
    }

    // =========================================================================
    // SELFISH MINING
    // =========================================================================

    #[test]
    fn test_selfish_withhold_then_release_reorgs_honest_block() {
        // Three validators: the adversary (v2) proposes slots 2, 5, 8, ...
        let mut env = env(AttackKind::Selfish, 3);
        let withhold = Action::selfish(ProposerAction::Withhold, AttesterAction::Vote);
        let release = Action::selfish(ProposerAction::ReleaseAll, AttesterAction::Vote);

        env.step(Action::honest(AttackKind::Selfish)).unwrap(); // slot 1, v1
        let outcome = env.step(withhold).unwrap(); // slot 2, adversary withholds b2
        assert_eq!(outcome.info.proposed, Some(BlockId::new(2)));
        assert_eq!(outcome.info.head, BlockId::new(1));

        env.step(withhold).unwrap(); // slot 3, v0 publishes b3 on b1
        env.step(withhold).unwrap(); // slot 4, v1 publishes b4 on b3
        let outcome = env.step(release).unwrap(); // slot 5, adversary releases b2

        assert_eq!(outcome.info.released, 1);
        assert_eq!(outcome.info.proposed, None);
        assert!(env.tree().blocks().all(|b| !b.is_withheld()));
        assert_eq!(env.tree().children_of(BlockId::new(1)).unwrap().len(), 2);
    }

    #[test]
    fn test_selfish_observation_tracks_adversary_weight() {
        let mut env = env(AttackKind::Selfish, 4);
        let withhold = Action::selfish(ProposerAction::Withhold, AttesterAction::Vote);

        let mut last = Vec::new();
        for _ in 0..8 {
            last = env.step(withhold).unwrap().observation;
        }

        assert_eq!(last.len(), 10);
        let private_weight: f64 = env
            .tree()
            .blocks_proposed_by(env.adversary())
            .map(|b| b.weight())
            .sum();
        assert!((last[9] as f64 - private_weight).abs() < 1e-4);
        assert!(last[8] > 0.0);
    }

    #[test]
    fn test_selfish_random_episode_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5e1f);
        let mut env = env(AttackKind::Selfish, 6);
        let actions = Action::all(AttackKind::Selfish);

        for _ in 0..120 {
            let outcome = env.step(*actions.choose(&mut rng).unwrap()).unwrap();
            assert!((0.0..=1.0).contains(&outcome.reward));

            let chain = ForkChoiceEngine::new(env.tree()).canonical_chain();
            assert_eq!(chain.last(), Some(&outcome.info.head));
            assert!(chain
                .iter()
                .skip(1)
                .all(|id| !env.tree().block(*id).unwrap().is_withheld()));
        }
        assert_eq!(env.slot(), 120);
    }

    #[test]
    fn test_selfish_genesis_weight_counts_every_vote_and_boost() {
        let mut rng = StdRng::seed_from_u64(0xb005);
        let mut env = env(AttackKind::Selfish, 5);
        let actions = Action::all(AttackKind::Selfish);
        let boost = ForkChoiceConfig::default().proposer_boost();

        let mut votes = 0u64;
        for _ in 0..80 {
            let action = *actions.choose(&mut rng).unwrap();
            env.step(action).unwrap();
            votes += 4;
            if action.attester() == AttesterAction::Vote {
                votes += 1;
            }
        }

        // Boosts are never cleared, so each inserted block contributes one
        let blocks = (env.tree().len() - 1) as f64;
        let expected = votes as f64 + blocks * boost;
        let genesis = env.tree().weight_of(BlockId::GENESIS).unwrap();
        assert!((genesis - expected).abs() < 1e-6, "{genesis} != {expected}");
    }

    // =========================================================================
    // STAIRCASE
    // =========================================================================

    #[test]
    fn test_staircase_honest_episode_reward_stops_at_finality() {
        let mut env = env(AttackKind::Staircase, 8);
        let rewards: Vec<f64> = (0..10)
            .map(|_| env.step(Action::honest(AttackKind::Staircase)).unwrap().reward)
            .collect();

        // Epoch 1 targets an unregistered checkpoint, epoch 2 justifies the
        // first one, epoch 3 justifies the next and finalizes its predecessor.
        assert_eq!(&rewards[..3], &[1.0, 1.0, 0.0]);
        assert!(rewards[3..].iter().all(|r| *r == 0.0));
    }

    #[test]
    fn test_staircase_abstaining_minority_cannot_stop_finality() {
        let mut env = env(AttackKind::Staircase, 8);
        let abstain = Action::staircase(StaircaseProposerAction::Publish, AttesterAction::Abstain);

        let mut outcome = None;
        for _ in 0..6 {
            outcome = Some(env.step(abstain).unwrap());
        }
        let outcome = outcome.unwrap();
        assert!(outcome.info.last_finalized.is_some());
        assert_eq!(outcome.observation.len(), 67);
    }

    #[test]
    fn test_staircase_blocking_minority_prevents_justification() {
        // Three validators: without the adversary only 2/3 < 0.67 vote.
        let mut env = env(AttackKind::Staircase, 3);
        let abstain = Action::staircase(StaircaseProposerAction::Publish, AttesterAction::Abstain);

        for _ in 0..12 {
            let outcome = env.step(abstain).unwrap();
            assert_eq!(outcome.reward, 1.0);
            assert_eq!(outcome.info.last_justified, None);
        }
    }

    #[test]
    fn test_staircase_j_priv_reports_latest_adversary_epoch() {
        let mut env = env(AttackKind::Staircase, 4);
        let withhold = Action::staircase(StaircaseProposerAction::Withhold, AttesterAction::Vote);

        let mut observation = Vec::new();
        for _ in 0..7 {
            observation = env.step(withhold).unwrap().observation;
        }

        // The adversary (v3) proposed epoch 3 and epoch 7
        assert_eq!(observation[65], 7.0);
        assert_eq!(observation[66], observation[64].min(7.0));
    }

    #[test]
    fn test_release_all_rejected_in_staircase() {
        let mut env = env(AttackKind::Staircase, 4);
        assert!(matches!(
            Action::decode(AttackKind::Staircase, 2, 0),
            Err(EnvError::UnsupportedAction { .. })
        ));
        assert!(Action::new(AttackKind::Staircase, ProposerAction::ReleaseAll, AttesterAction::Vote).is_err());
        let release = Action::selfish(ProposerAction::ReleaseAll, AttesterAction::Vote);
        assert!(matches!(env.step(release), Err(EnvError::ActionMismatch { .. })));
        assert_eq!(env.tree().len(), 1);
    }

    // =========================================================================
    // RUNTIME
    // =========================================================================

    #[test]
    fn test_parallel_run_matches_sequential_episodes() {
        let config = RunConfig {
            env: EnvConfig::new(AttackKind::Selfish, 6),
            episodes: 6,
            steps: 50,
            policy: PolicyKind::Random,
            seed: 99,
        };

        let parallel = run(&config).unwrap();
        let sequential: Vec<_> = (0..config.episodes)
            .map(|episode| sim_runtime::run_episode(&config, episode).unwrap())
            .collect();

        assert_eq!(parallel.episodes, sequential);
    }

    #[test]
    fn test_run_summary_serializes_to_json() {
        let config = RunConfig {
            env: EnvConfig::new(AttackKind::Staircase, 4),
            episodes: 2,
            steps: 10,
            policy: PolicyKind::Withholding,
            seed: 0,
        };
        let summary = run(&config).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["attack"], "staircase");
        assert_eq!(json["policy"], "withholding");
        assert_eq!(json["episodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_adversary_is_last_validator() {
        let env = env(AttackKind::Selfish, 16);
        assert_eq!(env.adversary(), ValidatorId::new(15));
    }
}

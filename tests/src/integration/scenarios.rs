//! # Core Scenarios
//!
//! Reference scenarios for the block tree, fork choice and finality gadget,
//! plus the cross-engine flow the staircase environment relies on: the head
//! chosen by fork choice is the checkpoint the validators vote for.

#[cfg(test)]
mod tests {
    use gs_01_fork_choice::{
        BlockTree, BoostReplacement, ForkChoiceConfig, ForkChoiceEngine, ForkChoiceError,
        VoteAccounting,
    };
    use gs_02_finality::{CheckpointState, FinalityConfig, FinalityGadget};
    use shared_types::{BlockId, CheckpointId, ValidatorId};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn b(id: u64) -> BlockId {
        BlockId::new(id)
    }

    fn v(id: usize) -> ValidatorId {
        ValidatorId::new(id)
    }

    fn cp(id: u64) -> CheckpointId {
        CheckpointId::new(id)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // =========================================================================
    // FORK CHOICE
    // =========================================================================

    #[test]
    fn test_scenario_a_single_vote_moves_head() {
        let mut tree = BlockTree::new(1, ForkChoiceConfig::default());
        tree.insert_block(b(1), BlockId::GENESIS, v(0), false, 1)
            .unwrap();
        tree.record_vote(v(0), b(1)).unwrap();

        assert_close(tree.weight_of(b(1)).unwrap(), 1.0);
        assert_eq!(tree.head(), b(1));
    }

    #[test]
    fn test_scenario_b_equal_weight_tie_break() {
        let mut tree = BlockTree::new(2, ForkChoiceConfig::default());
        tree.insert_block(b(3), BlockId::GENESIS, v(0), false, 1)
            .unwrap();
        tree.insert_block(b(7), BlockId::GENESIS, v(1), false, 1)
            .unwrap();
        tree.record_vote(v(0), b(3)).unwrap();
        tree.record_vote(v(1), b(7)).unwrap();

        assert_eq!(tree.head(), b(7));
    }

    #[test]
    fn test_scenario_e_boost_applies_and_reverts_along_ancestry() {
        let config = ForkChoiceConfig::default();
        let boost = config.proposer_boost();
        let mut tree = BlockTree::new(2, config);
        for id in 1..=4 {
            tree.insert_block(b(id), b(id - 1), v(0), false, id).unwrap();
        }
        tree.record_vote(v(1), b(2)).unwrap();

        let before: Vec<f64> = (0..=4).map(|id| tree.weight_of(b(id)).unwrap()).collect();
        tree.apply_proposer_boost(b(4)).unwrap();

        for id in 0..=4 {
            assert_close(tree.weight_of(b(id)).unwrap(), before[id as usize] + boost);
        }

        tree.clear_proposer_boost();
        for id in 0..=4 {
            assert_close(tree.weight_of(b(id)).unwrap(), before[id as usize]);
        }
        assert_eq!(tree.boosted_block(), None);
    }

    #[test]
    fn test_boost_replacement_modes() {
        let keep = ForkChoiceConfig::default();
        let clear = ForkChoiceConfig {
            boost_replacement: BoostReplacement::ClearPrevious,
            ..ForkChoiceConfig::default()
        };
        let boost = keep.proposer_boost();

        for (config, expected_genesis) in [(keep, 2.0 * boost), (clear, boost)] {
            let mut tree = BlockTree::new(1, config);
            tree.insert_block(b(1), BlockId::GENESIS, v(0), false, 1)
                .unwrap();
            tree.insert_block(b(2), b(1), v(0), false, 2).unwrap();
            tree.apply_proposer_boost(b(1)).unwrap();
            tree.apply_proposer_boost(b(2)).unwrap();

            assert_close(tree.weight_of(BlockId::GENESIS).unwrap(), expected_genesis);
        }
    }

    #[test]
    fn test_vote_accounting_modes_diverge_on_moved_vote() {
        let cumulative = ForkChoiceConfig::default();
        let latest = ForkChoiceConfig {
            vote_accounting: VoteAccounting::LatestMessage,
            ..ForkChoiceConfig::default()
        };

        let run = |config: ForkChoiceConfig| {
            let mut tree = BlockTree::new(1, config);
            tree.insert_block(b(1), BlockId::GENESIS, v(0), false, 1)
                .unwrap();
            tree.insert_block(b(2), BlockId::GENESIS, v(0), false, 1)
                .unwrap();
            tree.record_vote(v(0), b(1)).unwrap();
            tree.record_vote(v(0), b(2)).unwrap();
            tree
        };

        let tree = run(cumulative);
        assert_close(tree.weight_of(b(1)).unwrap(), 1.0);
        assert_close(tree.weight_of(BlockId::GENESIS).unwrap(), 2.0);

        let tree = run(latest);
        assert_close(tree.weight_of(b(1)).unwrap(), 0.0);
        assert_close(tree.weight_of(BlockId::GENESIS).unwrap(), 1.0);
        assert!(tree.votes_of(b(1)).unwrap().is_empty());
    }

    #[test]
    fn test_errors_leave_tree_unchanged() {
        let mut tree = BlockTree::new(1, ForkChoiceConfig::default());
        tree.insert_block(b(1), BlockId::GENESIS, v(0), false, 1)
            .unwrap();

        assert_eq!(
            tree.insert_block(b(2), b(99), v(0), false, 2),
            Err(ForkChoiceError::UnknownParent(b(99)))
        );
        assert_eq!(
            tree.insert_block(b(1), BlockId::GENESIS, v(0), false, 2),
            Err(ForkChoiceError::DuplicateBlock(b(1)))
        );
        assert_eq!(
            tree.record_vote(v(5), b(1)),
            Err(ForkChoiceError::UnknownValidator(v(5)))
        );
        assert_eq!(
            tree.apply_proposer_boost(b(42)),
            Err(ForkChoiceError::UnknownBlock(b(42)))
        );

        assert_eq!(tree.len(), 2);
        assert_close(tree.weight_of(BlockId::GENESIS).unwrap(), 0.0);
        assert_eq!(tree.boosted_block(), None);
    }

    #[test]
    fn test_selfish_fork_wins_after_release() {
        // Adversary (v2) withholds a two-block branch, honest v0/v1 extend the
        // public chain by one block; releasing the heavier private branch
        // reorganizes the head.
        let mut tree = BlockTree::new(3, ForkChoiceConfig::default());
        tree.insert_block(b(1), BlockId::GENESIS, v(2), true, 1)
            .unwrap();
        tree.insert_block(b(2), b(1), v(2), true, 2).unwrap();
        tree.record_vote(v(2), b(2)).unwrap();

        tree.insert_block(b(3), BlockId::GENESIS, v(0), false, 3)
            .unwrap();
        tree.record_vote(v(0), b(3)).unwrap();
        assert_eq!(tree.head(), b(3));

        // b(3) inherits the adversary support recorded on the unrelated branch
        assert!(tree.votes_of(b(3)).unwrap().contains(&v(2)));

        tree.record_vote(v(1), b(2)).unwrap();
        assert_eq!(tree.head(), b(3), "Withheld branch stays invisible");

        assert_eq!(tree.release_withheld(v(2)), 2);
        assert_eq!(tree.head(), b(2));
        assert_eq!(
            ForkChoiceEngine::new(&tree).canonical_chain(),
            vec![BlockId::GENESIS, b(1), b(2)]
        );
    }

    // =========================================================================
    // FINALITY
    // =========================================================================

    #[test]
    fn test_scenario_c_threshold_boundary() {
        let mut gadget = FinalityGadget::new(FinalityConfig::with_validators(4));
        gadget.register(cp(1));
        gadget.vote(v(0), cp(1));
        gadget.vote(v(1), cp(1));

        assert!(gadget.update().is_empty());
        assert!(!gadget.is_justified(cp(1)));

        gadget.vote(v(2), cp(1));
        let update = gadget.update();
        assert_eq!(update.newly_justified, vec![cp(1)]);
        assert_eq!(gadget.last_justified(), Some(cp(1)));
    }

    #[test]
    fn test_scenario_d_second_justification_finalizes_first() {
        let mut gadget = FinalityGadget::new(FinalityConfig::with_validators(4));
        gadget.register(cp(1));
        gadget.register(cp(2));

        for voter in 0..3 {
            gadget.vote(v(voter), cp(1));
        }
        gadget.update();
        assert_eq!(gadget.last_finalized(), None);

        for voter in 0..3 {
            gadget.vote(v(voter), cp(2));
        }
        let update = gadget.update();

        assert_eq!(update.newly_finalized, Some(cp(1)));
        assert_eq!(gadget.last_finalized(), Some(cp(1)));
        assert_eq!(gadget.state_of(cp(1)).unwrap(), CheckpointState::Finalized);
        assert_eq!(gadget.state_of(cp(2)).unwrap(), CheckpointState::Justified);
    }

    // =========================================================================
    // CROSS-ENGINE
    // =========================================================================

    #[test]
    fn test_head_checkpoints_justify_and_finalize() {
        let validators = 4;
        let mut tree = BlockTree::new(validators, ForkChoiceConfig::default());
        let mut gadget = FinalityGadget::new(FinalityConfig::with_validators(validators));

        for epoch in 1..=3u64 {
            let parent = tree.head();
            tree.insert_block(b(epoch), parent, v(epoch as usize % validators), false, epoch)
                .unwrap();
            tree.apply_proposer_boost(b(epoch)).unwrap();
            gadget.register(CheckpointId::from(b(epoch)));

            let target = CheckpointId::from(tree.head());
            for voter in 0..validators {
                tree.record_vote(v(voter), tree.head()).unwrap();
                gadget.vote(v(voter), target);
            }
            gadget.update();
        }

        assert_eq!(tree.head(), b(3));
        assert_eq!(gadget.last_justified(), Some(cp(3)));
        assert_eq!(gadget.last_finalized(), Some(cp(2)));
        assert!(gadget.finalized().iter().all(|c| gadget.is_justified(*c)));
    }

    #[test]
    fn test_withheld_head_delays_justification() {
        // The adversary withholds the new block: validators keep voting for the
        // old head, whose checkpoint was never registered, so nothing
        // justifies.
        let mut tree = BlockTree::new(4, ForkChoiceConfig::default());
        let mut gadget = FinalityGadget::new(FinalityConfig::with_validators(4));

        tree.insert_block(b(1), BlockId::GENESIS, v(3), true, 1)
            .unwrap();
        gadget.register(cp(1));

        let target = CheckpointId::from(tree.head());
        assert_eq!(target, CheckpointId::from(BlockId::GENESIS));
        for voter in 0..4 {
            assert!(!gadget.vote(v(voter), target));
        }

        assert!(gadget.update().is_empty());
        assert_eq!(gadget.votes_for(cp(1)).unwrap(), 0);
    }
}

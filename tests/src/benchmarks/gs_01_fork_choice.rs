//! # GS-01 Fork Choice Benchmarks
//!
//! - Head selection over deep linear chains
//! - Head selection over wide fork bombs
//! - Vote recording with full-ancestry propagation
//! - Block insertion with vote inheritance from competing branches

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use gs_01_fork_choice::{BlockTree, ForkChoiceConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{BlockId, ValidatorId};
use std::time::Duration;

fn linear_tree(blocks: u64, validators: usize) -> BlockTree {
    let mut tree = BlockTree::new(validators, ForkChoiceConfig::default());
    for id in 1..=blocks {
        let proposer = ValidatorId::new(id as usize % validators);
        tree.insert_block(BlockId::new(id), BlockId::new(id - 1), proposer, false, id)
            .expect("linear insert");
        tree.record_vote(proposer, BlockId::new(id)).expect("vote");
    }
    tree
}

pub fn bench_head_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("gs-01/head");
    group.measurement_time(Duration::from_secs(5));

    for count in [100u64, 1_000, 5_000] {
        let tree = linear_tree(count, 128);
        group.bench_with_input(BenchmarkId::new("linear_chain", count), &tree, |b, tree| {
            b.iter(|| black_box(tree.head()))
        });
    }

    // Many competing forks off genesis
    for forks in [100u64, 1_000] {
        let mut tree = BlockTree::new(128, ForkChoiceConfig::default());
        let mut rng = StdRng::seed_from_u64(forks);
        for id in 1..=forks {
            tree.insert_block(BlockId::new(id), BlockId::GENESIS, ValidatorId::new(0), false, 1)
                .expect("fork insert");
            tree.record_vote(ValidatorId::new(rng.gen_range(0..128)), BlockId::new(id))
                .expect("vote");
        }
        group.bench_with_input(BenchmarkId::new("fork_bomb", forks), &tree, |b, tree| {
            b.iter(|| black_box(tree.head()))
        });
    }

    group.finish();
}

pub fn bench_vote_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("gs-01/votes");

    for depth in [64u64, 512] {
        group.throughput(Throughput::Elements(128));
        group.bench_with_input(BenchmarkId::new("committee_vote", depth), &depth, |b, &depth| {
            let mut tree = linear_tree(depth, 128);
            let head = tree.head();
            b.iter(|| {
                for v in 0..128 {
                    tree.record_vote(ValidatorId::new(v), head).expect("vote");
                }
            })
        });
    }

    group.finish();
}

pub fn bench_block_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("gs-01/insert");

    for blocks in [100u64, 500] {
        group.throughput(Throughput::Elements(blocks));
        group.bench_with_input(BenchmarkId::new("two_branches", blocks), &blocks, |b, &blocks| {
            b.iter(|| {
                // Alternate between two branches so every insert inherits the
                // other branch's support
                let mut tree = BlockTree::new(16, ForkChoiceConfig::default());
                let mut tips = [BlockId::GENESIS, BlockId::GENESIS];
                for id in 1..=blocks {
                    let branch = (id % 2) as usize;
                    let block = BlockId::new(id);
                    tree.insert_block(block, tips[branch], ValidatorId::new(branch), false, id)
                        .expect("insert");
                    tree.record_vote(ValidatorId::new(id as usize % 16), block)
                        .expect("vote");
                    tips[branch] = block;
                }
                black_box(tree.head())
            })
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_head_selection(c);
    bench_vote_recording(c);
    bench_block_insertion(c);
}

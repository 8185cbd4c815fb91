//! Observation vectors handed to the agent after every reset and step.
//!
//! Selfish (`selfish_lookahead + 2` entries):
//! proposer-duty flags for the upcoming slots, public head weight, and the
//! summed weight of every adversary block.
//!
//! Staircase (`staircase_lookahead + 3` entries):
//! proposer-duty flags for the upcoming epochs, `j_pub`, `j_priv`, `j_global`.

use gs_01_fork_choice::BlockTree;
use gs_02_finality::FinalityGadget;
use shared_types::ValidatorId;

/// Proposer of a slot or epoch: round-robin over the validator set.
pub fn proposer_for(index: u64, num_validators: usize) -> ValidatorId {
    ValidatorId::new((index % num_validators as u64) as usize)
}

fn duty_flags(from: u64, lookahead: usize, num_validators: usize, adversary: ValidatorId) -> Vec<f32> {
    (from..from + lookahead as u64)
        .map(|i| {
            if proposer_for(i, num_validators) == adversary {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}

pub fn selfish_observation(
    tree: &BlockTree,
    slot: u64,
    lookahead: usize,
    adversary: ValidatorId,
) -> Vec<f32> {
    let num_validators = tree.validators().len();
    let mut obs = duty_flags(slot, lookahead, num_validators, adversary);

    let public_weight = tree.weight_of(tree.head()).unwrap_or_default();
    let private_weight: f64 = tree.blocks_proposed_by(adversary).map(|b| b.weight()).sum();

    obs.push(public_weight as f32);
    obs.push(private_weight as f32);
    obs
}

pub fn staircase_observation(
    tree: &BlockTree,
    gadget: &FinalityGadget,
    epoch: u64,
    lookahead: usize,
    adversary: ValidatorId,
) -> Vec<f32> {
    let num_validators = tree.validators().len();
    let mut obs = duty_flags(epoch, lookahead, num_validators, adversary);

    let j_pub = gadget.last_justified().map_or(0, |c| c.as_u64());
    let j_priv = tree
        .blocks_proposed_by(adversary)
        .map(|b| b.slot())
        .max()
        .unwrap_or(0);

    obs.push(j_pub as f32);
    obs.push(j_priv as f32);
    obs.push(j_pub.min(j_priv) as f32);
    obs
}

//! Per-episode simulation context

use crate::config::{AttackKind, EnvConfig};
use gs_01_fork_choice::BlockTree;
use gs_02_finality::{FinalityConfig, FinalityGadget};

/// Everything one episode mutates. Episodes never share a context; running
/// episodes in parallel means building one context per episode.
#[derive(Clone, Debug)]
pub struct SimulationContext {
    pub tree: BlockTree,
    /// Present only for checkpoint-based (staircase) episodes
    pub gadget: Option<FinalityGadget>,
}

impl SimulationContext {
    pub fn new(config: &EnvConfig) -> Self {
        let gadget = (config.attack == AttackKind::Staircase).then(|| {
            FinalityGadget::new(FinalityConfig {
                threshold: config.justification_threshold,
                total_validators: config.num_validators,
            })
        });
        Self {
            tree: Self::fresh_tree(config),
            gadget,
        }
    }

    /// Start a new episode: rebuild the tree and reset the gadget.
    pub fn reset(&mut self, config: &EnvConfig) {
        self.tree = Self::fresh_tree(config);
        if let Some(gadget) = self.gadget.as_mut() {
            gadget.reset();
        }
    }

    fn fresh_tree(config: &EnvConfig) -> BlockTree {
        BlockTree::new(config.num_validators, config.fork_choice.clone())
    }
}

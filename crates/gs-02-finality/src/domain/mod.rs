//! Domain module for Finality subsystem
//!
//! - checkpoint: Checkpoint entity and state progression
//! - gadget: Justification and finalization over registered checkpoints

pub mod checkpoint;
pub mod gadget;

pub use checkpoint::{Checkpoint, CheckpointState};
pub use gadget::{FinalityGadget, FinalityUpdate};

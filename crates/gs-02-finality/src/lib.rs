//! # gs-02-finality
//!
//! Finality Gadget tracking checkpoint justification and finalization.
//!
//! ## Overview
//!
//! - **Registration**: the orchestration layer registers one checkpoint per
//!   epoch boundary
//! - **Votes**: every vote counts as one unit, regardless of stake
//! - **Justification**: `votes / total_validators >= threshold` (default 0.67)
//! - **Finalization**: the second-largest justified checkpoint is finalized
//!
//! ```text
//! [UNREGISTERED] ──register──→ [PENDING] ──threshold──→ [JUSTIFIED] ──successor justified──→ [FINALIZED]
//! ```
//!
//! The gadget knows nothing about blocks: checkpoint identifiers and voter
//! identities are handed to it by the caller.
//!
//! ## Example
//!
//! ```rust
//! use gs_02_finality::{FinalityConfig, FinalityGadget};
//! use shared_types::{CheckpointId, ValidatorId};
//!
//! let mut gadget = FinalityGadget::new(FinalityConfig::with_validators(4));
//! for epoch in 1..=2 {
//!     let cp = CheckpointId::new(epoch);
//!     gadget.register(cp);
//!     for v in 0..3 {
//!         gadget.vote(ValidatorId::new(v), cp);
//!     }
//!     gadget.update();
//! }
//! assert_eq!(gadget.last_finalized(), Some(CheckpointId::new(1)));
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;

pub use config::FinalityConfig;
pub use domain::{Checkpoint, CheckpointState, FinalityGadget, FinalityUpdate};
pub use error::{FinalityError, FinalityResult};

//! # Shared Types Crate
//!
//! Identifiers used across the simulator subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: block, validator and checkpoint identifiers
//!   are defined once here and used by every subsystem.
//! - **Ordered Identifiers**: every identifier is a totally ordered integer
//!   newtype, so tie-breaks and checkpoint sorting are numeric.

pub mod entities;

pub use entities::*;

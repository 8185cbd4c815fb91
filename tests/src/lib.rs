//! # Gasper-Sim Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per engine
//! │   ├── gs_01_fork_choice.rs
//! │   ├── gs_02_finality.rs
//! │   └── gs_03_attack_env.rs
//! │
//! └── integration/      # Cross-crate scenarios and full episodes
//!     ├── scenarios.rs
//!     └── episodes.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gs-tests
//!
//! # By category
//! cargo test -p gs-tests integration::scenarios::
//! cargo test -p gs-tests integration::episodes::
//!
//! # Benchmarks
//! cargo bench -p gs-tests
//! ```

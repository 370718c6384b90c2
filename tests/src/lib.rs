//! # Verification Badge Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared addresses and ledger setup
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── eligibility.rs    # Minting without (or twice with) an identity
//! │   └── delegation.rs     # Approval and operator abuse
//! │
//! └── integration/      # End-to-end behaviour
//!     ├── scenarios.rs      # Walkthroughs of the badge lifecycle
//!     ├── properties.rs     # Randomized property sweeps
//!     └── concurrency.rs    # Contention on one shared ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p vb-tests
//!
//! # By category
//! cargo test -p vb-tests integration::
//! cargo test -p vb-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p vb-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;
pub mod integration;

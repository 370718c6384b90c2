//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters connect the badge ledger to external systems.
//!
//! - Adapters implement domain ports
//! - The in-memory registry stands in for the on-chain identity registry

pub mod identity_registry;

pub use identity_registry::*;

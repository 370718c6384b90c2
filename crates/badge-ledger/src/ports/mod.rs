//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the badge ledger.
//!
//! - **Driving Port (Inbound)**: `BadgeLedgerApi`
//! - **Driven Port (Outbound)**: `IdentityRegistry`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

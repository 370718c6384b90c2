//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for badge issuance and transfer.
//! NO I/O, NO locking, NO logging.
//!
//! - This is the **inner layer** of the hexagonal architecture.
//! - The identity registry is reached only through the outbound port.
//! - Dependencies point INWARD only (adapters depend on this, not vice versa).

pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use ledger::*;
pub use services::*;
pub use value_objects::*;

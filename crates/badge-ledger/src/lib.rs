//! # Badge Ledger - Identity-Gated Verification Badges
//!
//! Issues one transferable badge per address that holds a verified identity
//! credential, and answers ownership and eligibility queries.
//!
//! ## Purpose
//!
//! A badge is a collectible, transferable token proving that its original
//! minter held a verified identity when it was minted. Identity credentials
//! live in a separate registry which this crate reaches through the
//! [`IdentityRegistry`](ports::outbound::IdentityRegistry) port. The badge
//! ledger never changes that registry.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Dense Ids | `domain/invariants.rs` - `check_dense_ids_invariant()` |
//! | INVARIANT-2 | Supply Matches Mint Log | `domain/invariants.rs` - `check_supply_invariant()` |
//! | INVARIANT-3 | No Zero Owner | `domain/invariants.rs` - `check_no_zero_owner_invariant()` |
//! | INVARIANT-4 | Owner Index Consistency | `domain/invariants.rs` - `check_owner_index_invariant()` |
//! | INVARIANT-5 | One Mint Per Address | `domain/invariants.rs` - `check_one_mint_per_address_invariant()` |
//! | INVARIANT-6 | Approvals Reference Existing Tokens | `domain/invariants.rs` - `check_approvals_invariant()` |
//!
//! ## Access Rules
//!
//! | Operation | Authorized Caller(s) | Enforcement |
//! |-----------|---------------------|-------------|
//! | `mint` (self-service) | Any address with a verified identity | `domain/services.rs` - `can_mint_for()` |
//! | `mint` (on behalf) | Contract owner only | `domain/services.rs` - `can_mint_for()` |
//! | `transfer_from` | Token owner, approved address, operator | `domain/services.rs` - `can_move_token()` |
//! | `approve` | Token owner, operator | `domain/services.rs` - `can_approve()` |
//! | `transfer_ownership` | Contract owner only | `domain/ledger.rs` |
//!
//! ## Outbound Dependencies
//!
//! | System | Trait | Purpose |
//! |--------|-------|---------|
//! | Identity registry | `IdentityRegistry` | Verified-identity check and credential id |
//!
//! ## Usage Example
//!
//! ```ignore
//! use badge_ledger::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(InMemoryIdentityRegistry::new(owner));
//! let service = BadgeService::new(&LedgerConfig::from_env()?, Arc::clone(&registry))?;
//!
//! registry.issue(owner, alice, "ipfs://identity")?;
//! let receipt = service.mint_badge(alice, "ipfs://badge")?;
//! assert_eq!(service.owner_of(receipt.token_id)?, alice);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;
pub mod telemetry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{BadgeInfo, BadgeStatus, BadgeToken, MintOutcome};

    // Value objects
    pub use crate::domain::value_objects::{Address, AddressParseError, IdentityTokenId, TokenId};

    // Ledger
    pub use crate::domain::ledger::{BadgeLedger, LedgerState};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::{BadgeLedgerApi, MintReceipt, MintRequest};
    pub use crate::ports::outbound::IdentityRegistry;

    // Events
    pub use crate::events::{EventLog, EventRecord, LedgerEvent};

    // Errors
    pub use crate::errors::{BadgeError, BadgeErrorKind, ConfigError};

    // Adapters
    pub use crate::adapters::{InMemoryIdentityRegistry, RegistryError};

    // Configuration and telemetry
    pub use crate::config::LedgerConfig;
    pub use crate::telemetry::{init_tracing, TelemetryConfig, TelemetryError};

    // Service
    pub use crate::service::{BadgeService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================

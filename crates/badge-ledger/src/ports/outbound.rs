//! # Driven Ports (SPI - Outbound)
//!
//! The badge ledger depends on exactly one collaborator: the identity
//! registry that issues soulbound (non-transferable) identity credentials.
//! The ledger only reads from it.

use crate::domain::value_objects::{Address, IdentityTokenId};
use std::sync::Arc;

// =============================================================================
// IDENTITY REGISTRY
// =============================================================================

/// Read-only view of the soulbound identity registry.
///
/// ## Implementation Notes
///
/// - Queries must be side-effect free and synchronous.
/// - The ledger never caches answers: eligibility is asked again on every
///   mint attempt and every eligibility query.
pub trait IdentityRegistry: Send + Sync {
    /// Identity credential currently held by `holder`, if any.
    fn identity_token_of(&self, holder: Address) -> Option<IdentityTokenId>;

    /// Does `holder` currently hold a verified identity credential?
    fn holds_verified_identity(&self, holder: Address) -> bool {
        self.identity_token_of(holder).is_some()
    }
}

impl<T: IdentityRegistry + ?Sized> IdentityRegistry for Arc<T> {
    fn identity_token_of(&self, holder: Address) -> Option<IdentityTokenId> {
        (**self).identity_token_of(holder)
    }

    fn holds_verified_identity(&self, holder: Address) -> bool {
        (**self).holds_verified_identity(holder)
    }
}

// =============================================================================
// TESTS
// =============================================================================

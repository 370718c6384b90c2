//! # Driving Ports (API - Inbound)
//!
//! The interface the badge ledger exposes to callers (a wallet-facing
//! backend, a UI polling layer, tests).

use crate::domain::value_objects::{Address, IdentityTokenId, TokenId};
use crate::errors::BadgeError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// REQUESTS / RECEIPTS
// =============================================================================

/// Caller intent to mint a badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// Address that will receive (and be recorded as minter of) the badge.
    pub target: Address,
    /// Metadata pointer stored on the badge.
    pub metadata_reference: String,
    /// Address issuing the request.
    pub requested_by: Address,
}

impl MintRequest {
    /// Contract owner minting for `target`.
    #[must_use]
    pub fn on_behalf(
        owner: Address,
        target: Address,
        metadata_reference: impl Into<String>,
    ) -> Self {
        Self {
            target,
            metadata_reference: metadata_reference.into(),
            requested_by: owner,
        }
    }

    /// `caller` minting for itself.
    #[must_use]
    pub fn self_service(caller: Address, metadata_reference: impl Into<String>) -> Self {
        Self {
            target: caller,
            metadata_reference: metadata_reference.into(),
            requested_by: caller,
        }
    }

    /// Returns true for the self-service path.
    #[must_use]
    pub fn is_self_service(&self) -> bool {
        self.target == self.requested_by
    }
}

/// Result of a committed mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Assigned badge id.
    pub token_id: TokenId,
    /// Correlation value carried by the `BadgeMinted` notification.
    pub identity_token_id: IdentityTokenId,
    /// Sequence number of the `BadgeMinted` record in the event log.
    pub event_sequence: u64,
    /// Request correlation id (also on the request's tracing span).
    pub correlation_id: Uuid,
}

// =============================================================================
// BADGE LEDGER API (Primary Driving Port)
// =============================================================================

/// Core badge ledger operations.
///
/// Mutations are atomic: each call either fully applies or returns a
/// `BadgeError` with no effect. Queries observe the last committed state.
pub trait BadgeLedgerApi: Send + Sync {
    /// Mint a badge for `target` on behalf of `requested_by`.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidRecipient`, `AlreadyMinted`, `NotEligible`.
    fn mint(
        &self,
        target: Address,
        metadata_reference: &str,
        requested_by: Address,
    ) -> Result<MintReceipt, BadgeError>;

    /// Move `token_id` from `current_owner` (the caller) to `new_owner`.
    ///
    /// # Errors
    ///
    /// `InvalidToken`, `NotOwner`, `InvalidRecipient`.
    fn transfer(
        &self,
        current_owner: Address,
        new_owner: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError>;

    /// Verified identity and no prior mint.
    fn is_eligible_for_badge(&self, address: Address) -> bool;

    /// Number of badges ever minted.
    fn total_supply(&self) -> u64;

    /// Current holder of `token_id`.
    ///
    /// # Errors
    ///
    /// `InvalidToken` for unminted ids.
    fn owner_of(&self, token_id: TokenId) -> Result<Address, BadgeError>;

    /// Badges currently held by `address`.
    fn balance_of(&self, address: Address) -> u64;
}

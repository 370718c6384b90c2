//! # Domain Entities
//!
//! Badge records and the read-side views built from them.

use crate::domain::value_objects::{Address, IdentityTokenId, TokenId};
use serde::{Deserialize, Serialize};

// =============================================================================
// BADGE TOKEN
// =============================================================================

/// A minted verification badge.
///
/// `id`, `metadata_reference`, `minted_by` and `identity_token_id` are fixed
/// at mint time; only `owner` changes, and only through a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeToken {
    /// Sequential id, assigned in mint order starting at 0.
    pub id: TokenId,
    /// Current holder.
    pub owner: Address,
    /// Opaque metadata pointer (e.g. `ipfs://...`).
    pub metadata_reference: String,
    /// Address that minted the badge. Never changes.
    pub minted_by: Address,
    /// Identity credential the minter held when the badge was issued.
    pub identity_token_id: IdentityTokenId,
}

impl BadgeToken {
    /// Creates a freshly minted badge owned by its minter.
    #[must_use]
    pub fn new(
        id: TokenId,
        minter: Address,
        metadata_reference: impl Into<String>,
        identity_token_id: IdentityTokenId,
    ) -> Self {
        Self {
            id,
            owner: minter,
            metadata_reference: metadata_reference.into(),
            minted_by: minter,
            identity_token_id,
        }
    }

    /// Returns true if the badge has changed hands since minting.
    #[must_use]
    pub fn is_transferred(&self) -> bool {
        self.owner != self.minted_by
    }
}

// =============================================================================
// READ VIEWS
// =============================================================================

/// Per-address summary shown on the badge page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    /// Address holds a verified identity right now.
    pub is_verified: bool,
    /// Address may mint a badge right now.
    pub is_eligible_for_badge: bool,
    /// Address has consumed its one-time mint right.
    pub has_minted_badge: bool,
    /// Number of badges currently held.
    pub badge_balance: u64,
}

/// One badge currently held by an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeInfo {
    /// Badge id.
    pub token_id: TokenId,
    /// Metadata reference set at mint.
    pub token_uri: String,
    /// Identity credential id recorded at mint.
    pub soulbound_reference: IdentityTokenId,
}

impl From<&BadgeToken> for BadgeInfo {
    fn from(token: &BadgeToken) -> Self {
        Self {
            token_id: token.id,
            token_uri: token.metadata_reference.clone(),
            soulbound_reference: token.identity_token_id,
        }
    }
}

/// Outcome of a successful mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintOutcome {
    /// Id assigned to the new badge.
    pub token_id: TokenId,
    /// Correlation value carried by the `BadgeMinted` notification.
    pub identity_token_id: IdentityTokenId,
}

// =============================================================================
// TESTS
// =============================================================================

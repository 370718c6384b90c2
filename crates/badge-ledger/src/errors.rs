//! # Error Types
//!
//! All rejection and configuration errors for the badge ledger.
//!
//! Every ledger rejection is detected before any state mutation, so a
//! returned `BadgeError` always means "nothing changed".

use crate::domain::value_objects::{Address, AddressParseError, TokenId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Rejections produced by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadgeError {
    /// Caller lacks permission for the requested mutation.
    #[error("unauthorized: {caller} may not perform this operation")]
    Unauthorized {
        /// Rejected caller.
        caller: Address,
    },

    /// Target does not currently hold a verified identity.
    #[error("not eligible: {address} must have a verified identity")]
    NotEligible {
        /// Mint target.
        address: Address,
    },

    /// Target has already consumed its one-time mint right.
    #[error("already minted: {address} has already minted a badge")]
    AlreadyMinted {
        /// Mint target.
        address: Address,
    },

    /// Transfer requested by someone other than the owner or a delegate,
    /// or `from` is not the recorded owner.
    #[error("not owner: {caller} cannot move token {token_id}")]
    NotOwner {
        /// Rejected caller.
        caller: Address,
        /// Badge the caller tried to move.
        token_id: TokenId,
    },

    /// Referenced token id has not been minted.
    #[error("invalid token: {0} does not exist")]
    InvalidToken(TokenId),

    /// Recipient is the zero address.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(Address),

    /// Operator approval targets the zero address or the owner itself.
    #[error("invalid operator: {0}")]
    InvalidOperator(Address),

    /// Enumeration index past the end of the collection.
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds {
        /// Requested position.
        index: u64,
        /// Number of entries available.
        len: u64,
    },
}

/// Fieldless discriminant of [`BadgeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeErrorKind {
    /// See [`BadgeError::Unauthorized`].
    Unauthorized,
    /// See [`BadgeError::NotEligible`].
    NotEligible,
    /// See [`BadgeError::AlreadyMinted`].
    AlreadyMinted,
    /// See [`BadgeError::NotOwner`].
    NotOwner,
    /// See [`BadgeError::InvalidToken`].
    InvalidToken,
    /// See [`BadgeError::InvalidRecipient`].
    InvalidRecipient,
    /// See [`BadgeError::InvalidOperator`].
    InvalidOperator,
    /// See [`BadgeError::IndexOutOfBounds`].
    IndexOutOfBounds,
}

impl BadgeError {
    /// Returns the kind of this rejection.
    #[must_use]
    pub fn kind(&self) -> BadgeErrorKind {
        match self {
            Self::Unauthorized { .. } => BadgeErrorKind::Unauthorized,
            Self::NotEligible { .. } => BadgeErrorKind::NotEligible,
            Self::AlreadyMinted { .. } => BadgeErrorKind::AlreadyMinted,
            Self::NotOwner { .. } => BadgeErrorKind::NotOwner,
            Self::InvalidToken(_) => BadgeErrorKind::InvalidToken,
            Self::InvalidRecipient(_) => BadgeErrorKind::InvalidRecipient,
            Self::InvalidOperator(_) => BadgeErrorKind::InvalidOperator,
            Self::IndexOutOfBounds { .. } => BadgeErrorKind::IndexOutOfBounds,
        }
    }

    /// Returns true if the caller may succeed by retrying later without
    /// changing the request (identity verification may complete meanwhile).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotEligible { .. })
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    /// An environment variable holds an unparseable address.
    #[error("{var} is not a valid address: {source}")]
    InvalidAddress {
        /// Variable name.
        var: &'static str,
        /// Parse failure.
        source: AddressParseError,
    },

    /// The contract owner is the zero address.
    #[error("owner must not be the zero address")]
    ZeroOwner,

    /// The identity registry address is the zero address.
    #[error("identity registry must not be the zero address")]
    ZeroIdentityRegistry,

    /// Name or symbol is empty.
    #[error("collection {0} must not be empty")]
    EmptyField(&'static str),
}

// =============================================================================
// TESTS
// =============================================================================

//! # Ledger Events
//!
//! Append-only, ordered journal of committed ledger mutations.
//!
//! Observers poll with a cursor (`events_since`) instead of registering
//! callbacks. A polling UI confirms an asynchronous mint submission by
//! waiting for the matching `BadgeMinted` record.
//!
//! Rejected operations never append.

use crate::domain::value_objects::{Address, IdentityTokenId, TokenId};
use serde::{Deserialize, Serialize};

// =============================================================================
// EVENTS
// =============================================================================

/// A committed ledger mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A badge was minted. `identity_token_id` is the correlation value.
    BadgeMinted {
        /// New badge holder (and minter).
        owner: Address,
        /// Assigned id.
        token_id: TokenId,
        /// Identity credential held by `owner` at mint time.
        identity_token_id: IdentityTokenId,
    },
    /// Ownership moved. `from` is the zero address on mint.
    Transfer {
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
        /// Moved badge.
        token_id: TokenId,
    },
    /// Single-token approval changed. Zero `approved` clears it.
    Approval {
        /// Token owner.
        owner: Address,
        /// Approved delegate.
        approved: Address,
        /// Badge concerned.
        token_id: TokenId,
    },
    /// Operator approval changed.
    ApprovalForAll {
        /// Token owner.
        owner: Address,
        /// Operator.
        operator: Address,
        /// Granted or revoked.
        approved: bool,
    },
    /// Contract ownership changed.
    OwnershipTransferred {
        /// Previous contract owner.
        previous_owner: Address,
        /// New contract owner.
        new_owner: Address,
    },
}

/// An event with its position in the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0, gap-free.
    pub sequence: u64,
    /// The event.
    pub event: LedgerEvent,
}

// =============================================================================
// EVENT LOG
// =============================================================================

/// Append-only event journal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its sequence number.
    pub fn append(&mut self, event: LedgerEvent) -> u64 {
        let sequence = self.records.len() as u64;
        self.records.push(EventRecord { sequence, event });
        sequence
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sequence number the next appended event will get.
    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.records.len() as u64
    }

    /// All records in order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `sequence >= cursor`.
    #[must_use]
    pub fn since(&self, cursor: u64) -> &[EventRecord] {
        let start = usize::try_from(cursor)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    /// `BadgeMinted` notifications in mint order.
    pub fn minted(&self) -> impl Iterator<Item = (Address, TokenId, IdentityTokenId)> + '_ {
        self.records.iter().filter_map(|r| match r.event {
            LedgerEvent::BadgeMinted {
                owner,
                token_id,
                identity_token_id,
            } => Some((owner, token_id, identity_token_id)),
            _ => None,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

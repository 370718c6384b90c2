//! # Domain Invariants
//!
//! Properties that MUST hold on every committed ledger state.
//!
//! - INVARIANT-1: Dense Ids (token at index `i` has id `i`)
//! - INVARIANT-2: Supply Matches Mint Log
//! - INVARIANT-3: No Zero Owner
//! - INVARIANT-4: Owner Index Consistency
//! - INVARIANT-5: One Mint Per Address
//! - INVARIANT-6: Approvals Reference Existing Tokens

use crate::domain::ledger::LedgerState;
use crate::domain::value_objects::{Address, TokenId};
use std::collections::HashSet;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Dense Ids
///
/// Ids are assigned 0, 1, 2, ... in mint order and never reused.
#[must_use]
pub fn check_dense_ids_invariant(state: &LedgerState) -> bool {
    state
        .tokens
        .iter()
        .enumerate()
        .all(|(i, token)| token.id == i as TokenId)
}

/// INVARIANT-2: Supply Matches Mint Log
///
/// Exactly one `BadgeMinted` per token, in id order.
#[must_use]
pub fn check_supply_invariant(state: &LedgerState) -> bool {
    let minted: Vec<TokenId> = state.events.minted().map(|(_, id, _)| id).collect();
    minted.len() as u64 == state.total_supply()
        && minted.iter().enumerate().all(|(i, id)| *id == i as TokenId)
}

/// INVARIANT-3: No Zero Owner
///
/// There is no burn, so no badge is ever held by the zero address.
#[must_use]
pub fn check_no_zero_owner_invariant(state: &LedgerState) -> bool {
    state.tokens.iter().all(|t| !t.owner.is_zero())
}

/// INVARIANT-4: Owner Index Consistency
///
/// The holdings index and the token records describe the same ownership.
#[must_use]
pub fn check_owner_index_invariant(state: &LedgerState) -> bool {
    let indexed: usize = state.holdings.values().map(|ids| ids.len()).sum();
    indexed == state.tokens.len()
        && state.tokens.iter().all(|t| {
            state
                .holdings
                .get(&t.owner)
                .is_some_and(|ids| ids.contains(&t.id))
        })
}

/// INVARIANT-5: One Mint Per Address
///
/// Minters are unique and `has_minted` is exactly the set of minters.
#[must_use]
pub fn check_one_mint_per_address_invariant(state: &LedgerState) -> bool {
    let minters: HashSet<Address> = state.tokens.iter().map(|t| t.minted_by).collect();
    minters.len() == state.tokens.len() && minters == state.has_minted
}

/// INVARIANT-6: Approvals Reference Existing Tokens
#[must_use]
pub fn check_approvals_invariant(state: &LedgerState) -> bool {
    state
        .token_approvals
        .iter()
        .all(|(id, approved)| *id < state.total_supply() && !approved.is_zero())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_dense_ids_invariant(state) {
        violations.push(InvariantViolation::SparseIds);
    }

    if !check_supply_invariant(state) {
        violations.push(InvariantViolation::SupplyMismatch {
            supply: state.total_supply(),
            minted_events: state.events.minted().count() as u64,
        });
    }

    if !check_no_zero_owner_invariant(state) {
        violations.push(InvariantViolation::ZeroOwner);
    }

    if !check_owner_index_invariant(state) {
        violations.push(InvariantViolation::OwnerIndexMismatch);
    }

    if !check_one_mint_per_address_invariant(state) {
        violations.push(InvariantViolation::DuplicateMinter {
            minters: state.has_minted.len(),
            tokens: state.tokens.len(),
        });
    }

    if !check_approvals_invariant(state) {
        violations.push(InvariantViolation::DanglingApproval);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Token ids are not `0..supply`.
    SparseIds,
    /// Supply disagrees with the mint log.
    SupplyMismatch {
        /// Recorded supply.
        supply: u64,
        /// `BadgeMinted` events in the log.
        minted_events: u64,
    },
    /// A badge is held by the zero address.
    ZeroOwner,
    /// Holdings index disagrees with token records.
    OwnerIndexMismatch,
    /// Minters are not unique or `has_minted` is out of sync.
    DuplicateMinter {
        /// Size of the `has_minted` set.
        minters: usize,
        /// Number of badges.
        tokens: usize,
    },
    /// An approval points at a missing token or the zero address.
    DanglingApproval,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SparseIds => write!(f, "token ids are not dense"),
            Self::SupplyMismatch {
                supply,
                minted_events,
            } => {
                write!(
                    f,
                    "supply {supply} does not match {minted_events} mint events"
                )
            }
            Self::ZeroOwner => write!(f, "badge owned by the zero address"),
            Self::OwnerIndexMismatch => write!(f, "owner index out of sync"),
            Self::DuplicateMinter { minters, tokens } => {
                write!(f, "{minters} recorded minters for {tokens} tokens")
            }
            Self::DanglingApproval => write!(f, "approval for missing token"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

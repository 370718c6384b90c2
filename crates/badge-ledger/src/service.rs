//! # Badge Service
//!
//! Thread-safe front of the badge ledger. Translates caller intent into
//! ledger calls, serializes mutations, and logs every outcome.
//!
//! ## Concurrency
//!
//! - The ledger sits behind one `parking_lot::RwLock`.
//! - A mutation holds the write lock across its whole check-then-apply
//!   sequence, including the identity registry query, so no other call can
//!   observe or interleave with a half-applied change.
//! - Queries take the read lock and see the last committed state. Multiple
//!   queries run in parallel.

use crate::config::LedgerConfig;
use crate::domain::entities::{BadgeInfo, BadgeStatus, MintOutcome};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::ledger::{BadgeLedger, LedgerState};
use crate::domain::value_objects::{Address, IdentityTokenId, TokenId};
use crate::errors::{BadgeError, ConfigError};
use crate::events::EventRecord;
use crate::ports::inbound::{BadgeLedgerApi, MintReceipt, MintRequest};
use crate::ports::outbound::IdentityRegistry;

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Statistics for the badge service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed mints.
    pub mints: u64,
    /// Committed transfers.
    pub transfers: u64,
    /// Committed approval changes (single-token and operator).
    pub approvals: u64,
    /// Rejected mutations of any kind.
    pub rejected: u64,
}

/// The badge service.
pub struct BadgeService<R> {
    ledger: Arc<RwLock<BadgeLedger<R>>>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<R> Clone for BadgeService<R> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<R: IdentityRegistry> BadgeService<R> {
    /// Create a service over a fresh ledger.
    ///
    /// # Errors
    ///
    /// Invalid configuration.
    pub fn new(config: &LedgerConfig, registry: R) -> Result<Self, ConfigError> {
        let ledger = BadgeLedger::new(config, registry)?;
        info!(
            name = %config.name,
            symbol = %config.symbol,
            owner = %config.owner,
            identity_registry = %config.identity_registry,
            "Badge ledger created"
        );
        Ok(Self::from_ledger(ledger))
    }

    /// Wrap an existing ledger.
    #[must_use]
    pub fn from_ledger(ledger: BadgeLedger<R>) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Handle a mint request.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidRecipient`, `AlreadyMinted`, `NotEligible`.
    pub fn handle_mint(&self, request: MintRequest) -> Result<MintReceipt, BadgeError> {
        self.mint_with_correlation(request, Uuid::new_v4())
    }

    #[instrument(
        skip(self, request),
        fields(
            correlation_id = %correlation_id,
            target = %request.target,
            requested_by = %request.requested_by,
        )
    )]
    fn mint_with_correlation(
        &self,
        request: MintRequest,
        correlation_id: Uuid,
    ) -> Result<MintReceipt, BadgeError> {
        let result = {
            let mut ledger = self.ledger.write();
            match ledger.mint(
                request.target,
                request.metadata_reference,
                request.requested_by,
            ) {
                Ok(outcome) => Ok((outcome, ledger.state().events().next_sequence() - 1)),
                Err(err) => Err(err),
            }
        };

        match result {
            Ok((
                MintOutcome {
                    token_id,
                    identity_token_id,
                },
                event_sequence,
            )) => {
                self.stats.write().mints += 1;
                info!(token_id, identity_token_id, "Badge minted");
                Ok(MintReceipt {
                    token_id,
                    identity_token_id,
                    event_sequence,
                    correlation_id,
                })
            }
            Err(err) => Err(self.reject("mint", err)),
        }
    }

    /// Owner-initiated mint on behalf of `to`.
    ///
    /// # Errors
    ///
    /// See [`handle_mint`](Self::handle_mint).
    pub fn safe_mint(
        &self,
        caller: Address,
        to: Address,
        metadata_reference: &str,
    ) -> Result<MintReceipt, BadgeError> {
        self.handle_mint(MintRequest::on_behalf(caller, to, metadata_reference))
    }

    /// Self-service mint.
    ///
    /// # Errors
    ///
    /// See [`handle_mint`](Self::handle_mint).
    pub fn mint_badge(
        &self,
        caller: Address,
        metadata_reference: &str,
    ) -> Result<MintReceipt, BadgeError> {
        self.handle_mint(MintRequest::self_service(caller, metadata_reference))
    }

    /// Delegated transfer.
    ///
    /// # Errors
    ///
    /// `InvalidToken`, `NotOwner`, `InvalidRecipient`.
    #[instrument(
        skip_all,
        fields(correlation_id = %Uuid::new_v4(), caller = %caller, from = %from, to = %to, token_id = token_id)
    )]
    pub fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        let result = self.ledger.write().transfer_from(caller, from, to, token_id);
        match result {
            Ok(()) => {
                self.stats.write().transfers += 1;
                info!(token_id, "Badge transferred");
                Ok(())
            }
            Err(err) => Err(self.reject("transfer", err)),
        }
    }

    /// Set or clear a single-token approval.
    ///
    /// # Errors
    ///
    /// `InvalidToken`, `Unauthorized`.
    #[instrument(skip_all, fields(caller = %caller, approved = %approved, token_id = token_id))]
    pub fn approve(
        &self,
        caller: Address,
        approved: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        let result = self.ledger.write().approve(caller, approved, token_id);
        self.record_approval(result, "approve")
    }

    /// Grant or revoke an operator.
    ///
    /// # Errors
    ///
    /// `InvalidOperator`.
    #[instrument(skip_all, fields(caller = %caller, operator = %operator, approved = approved))]
    pub fn set_approval_for_all(
        &self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), BadgeError> {
        let result = self
            .ledger
            .write()
            .set_approval_for_all(caller, operator, approved);
        self.record_approval(result, "set_approval_for_all")
    }

    /// Hand contract ownership over.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidRecipient`.
    #[instrument(skip_all, fields(caller = %caller, new_owner = %new_owner))]
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), BadgeError> {
        let result = self.ledger.write().transfer_ownership(caller, new_owner);
        match result {
            Ok(()) => {
                info!("Contract ownership transferred");
                Ok(())
            }
            Err(err) => Err(self.reject("transfer_ownership", err)),
        }
    }

    fn record_approval(
        &self,
        result: Result<(), BadgeError>,
        operation: &'static str,
    ) -> Result<(), BadgeError> {
        match result {
            Ok(()) => {
                self.stats.write().approvals += 1;
                debug!(operation, "Approval updated");
                Ok(())
            }
            Err(err) => Err(self.reject(operation, err)),
        }
    }

    fn reject(&self, operation: &'static str, err: BadgeError) -> BadgeError {
        self.stats.write().rejected += 1;
        warn!(operation, kind = ?err.kind(), error = %err, "Request rejected");
        err
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Run `f` against one consistent view of the committed state.
    pub fn with_state<T>(&self, f: impl FnOnce(&LedgerState) -> T) -> T {
        f(self.ledger.read().state())
    }

    /// Owned copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerState {
        self.with_state(LedgerState::clone)
    }

    /// Collection name.
    #[must_use]
    pub fn name(&self) -> String {
        self.with_state(|s| s.name().to_string())
    }

    /// Collection ticker.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.with_state(|s| s.symbol().to_string())
    }

    /// Contract owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.with_state(LedgerState::owner)
    }

    /// Identity registry address.
    #[must_use]
    pub fn identity_registry(&self) -> Address {
        self.with_state(LedgerState::identity_registry)
    }

    /// Metadata reference of `token_id`.
    ///
    /// # Errors
    ///
    /// `InvalidToken`.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String, BadgeError> {
        self.with_state(|s| s.token_uri(token_id).map(str::to_string))
    }

    /// Identity credential recorded on `token_id`.
    ///
    /// # Errors
    ///
    /// `InvalidToken`.
    pub fn soulbound_reference(&self, token_id: TokenId) -> Result<IdentityTokenId, BadgeError> {
        self.with_state(|s| s.soulbound_reference(token_id))
    }

    /// Original minter of `token_id`.
    ///
    /// # Errors
    ///
    /// `InvalidToken`.
    pub fn minted_by(&self, token_id: TokenId) -> Result<Address, BadgeError> {
        self.with_state(|s| s.minted_by(token_id))
    }

    /// Has `address` ever minted?
    #[must_use]
    pub fn has_minted(&self, address: Address) -> bool {
        self.with_state(|s| s.has_minted(address))
    }

    /// Badge page summary for `address`.
    #[must_use]
    pub fn badge_status(&self, address: Address) -> BadgeStatus {
        let status = self.ledger.read().badge_status(address);
        debug!(%address, ?status, "Badge status queried");
        status
    }

    /// Badges currently held by `address`.
    #[must_use]
    pub fn badges_of(&self, address: Address) -> Vec<BadgeInfo> {
        self.with_state(|s| s.badges_of(address))
    }

    /// Single-token approval.
    ///
    /// # Errors
    ///
    /// `InvalidToken`.
    pub fn get_approved(&self, token_id: TokenId) -> Result<Option<Address>, BadgeError> {
        self.with_state(|s| s.get_approved(token_id))
    }

    /// Operator approval.
    #[must_use]
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.with_state(|s| s.is_approved_for_all(owner, operator))
    }

    /// Global enumeration.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds`.
    pub fn token_by_index(&self, index: u64) -> Result<TokenId, BadgeError> {
        self.with_state(|s| s.token_by_index(index))
    }

    /// Per-owner enumeration.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds`.
    pub fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Result<TokenId, BadgeError> {
        self.with_state(|s| s.token_of_owner_by_index(owner, index))
    }

    /// Ids held by `owner`, ascending.
    #[must_use]
    pub fn tokens_of_owner(&self, owner: Address) -> Vec<TokenId> {
        self.with_state(|s| s.tokens_of_owner(owner))
    }

    /// Event records with `sequence >= cursor`.
    #[must_use]
    pub fn events_since(&self, cursor: u64) -> Vec<EventRecord> {
        self.with_state(|s| s.events().since(cursor).to_vec())
    }

    /// `(owner, token_id, identity_token_id)` for every mint, in order.
    #[must_use]
    pub fn minted_events(&self) -> Vec<(Address, TokenId, IdentityTokenId)> {
        self.with_state(|s| s.events().minted().collect())
    }

    /// Check all ledger invariants on the committed state.
    #[must_use]
    pub fn check_invariants(&self) -> InvariantCheckResult {
        let result = self.with_state(check_all_invariants);
        if let InvariantCheckResult::Invalid(violations) = &result {
            warn!(count = violations.len(), "Ledger invariants violated");
        }
        result
    }
}

impl<R: IdentityRegistry> BadgeLedgerApi for BadgeService<R> {
    fn mint(
        &self,
        target: Address,
        metadata_reference: &str,
        requested_by: Address,
    ) -> Result<MintReceipt, BadgeError> {
        self.handle_mint(MintRequest {
            target,
            metadata_reference: metadata_reference.to_string(),
            requested_by,
        })
    }

    fn transfer(
        &self,
        current_owner: Address,
        new_owner: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        self.transfer_from(current_owner, current_owner, new_owner, token_id)
    }

    fn is_eligible_for_badge(&self, address: Address) -> bool {
        self.ledger.read().is_eligible_for_badge(address)
    }

    fn total_supply(&self) -> u64 {
        self.with_state(LedgerState::total_supply)
    }

    fn owner_of(&self, token_id: TokenId) -> Result<Address, BadgeError> {
        self.with_state(|s| s.owner_of(token_id))
    }

    fn balance_of(&self, address: Address) -> u64 {
        self.with_state(|s| s.balance_of(address))
    }
}

// =============================================================================
// TESTS
// =============================================================================

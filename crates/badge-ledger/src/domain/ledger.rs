//! # Badge Ledger
//!
//! The badge state machine. Per address:
//!
//! ```text
//! Ineligible --(identity verified elsewhere)--> Eligible --(mint)--> Minted
//! ```
//!
//! `Minted` is terminal. Transfers move badge ownership but never touch the
//! `has_minted` set, so neither party of a transfer gains or loses the
//! right to mint.
//!
//! Every mutation runs all of its checks before touching state; a rejected
//! call leaves the ledger exactly as it was.

use crate::config::LedgerConfig;
use crate::domain::entities::{BadgeInfo, BadgeStatus, BadgeToken, MintOutcome};
use crate::domain::services::{can_approve, can_mint_for, can_move_token};
use crate::domain::value_objects::{Address, IdentityTokenId, TokenId};
use crate::errors::{BadgeError, ConfigError};
use crate::events::{EventLog, LedgerEvent};
use crate::ports::outbound::IdentityRegistry;
use std::collections::{BTreeSet, HashMap, HashSet};

// =============================================================================
// LEDGER STATE
// =============================================================================

/// Committed ledger data. Cloning it yields a consistent snapshot.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub(crate) name: String,
    pub(crate) symbol: String,
    pub(crate) owner: Address,
    pub(crate) identity_registry: Address,
    /// Indexed by token id; ids are dense because nothing is ever burned.
    pub(crate) tokens: Vec<BadgeToken>,
    /// Owner index for balances and enumeration.
    pub(crate) holdings: HashMap<Address, BTreeSet<TokenId>>,
    /// Every address that ever minted. Only `mint` inserts; nothing removes.
    pub(crate) has_minted: HashSet<Address>,
    pub(crate) token_approvals: HashMap<TokenId, Address>,
    /// `(owner, operator)` pairs.
    pub(crate) operator_approvals: HashSet<(Address, Address)>,
    pub(crate) events: EventLog,
}

impl LedgerState {
    fn new(config: &LedgerConfig) -> Self {
        Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            owner: config.owner,
            identity_registry: config.identity_registry,
            tokens: Vec::new(),
            holdings: HashMap::new(),
            has_minted: HashSet::new(),
            token_approvals: HashMap::new(),
            operator_approvals: HashSet::new(),
            events: EventLog::new(),
        }
    }

    /// Collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection ticker.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Contract owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Address of the identity registry this ledger is bound to.
    #[must_use]
    pub fn identity_registry(&self) -> Address {
        self.identity_registry
    }

    /// Number of badges ever minted. Never decreases.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.tokens.len() as u64
    }

    /// Id the next successful mint will receive. Always equals `total_supply`.
    #[must_use]
    pub fn next_token_id(&self) -> TokenId {
        self.total_supply()
    }

    /// Badge record for `token_id`.
    pub fn token(&self, token_id: TokenId) -> Result<&BadgeToken, BadgeError> {
        usize::try_from(token_id)
            .ok()
            .and_then(|i| self.tokens.get(i))
            .ok_or(BadgeError::InvalidToken(token_id))
    }

    /// Current holder of `token_id`.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, BadgeError> {
        self.token(token_id).map(|t| t.owner)
    }

    /// Number of badges `holder` currently owns.
    #[must_use]
    pub fn balance_of(&self, holder: Address) -> u64 {
        self.holdings.get(&holder).map_or(0, |ids| ids.len() as u64)
    }

    /// Metadata reference set at mint.
    pub fn token_uri(&self, token_id: TokenId) -> Result<&str, BadgeError> {
        self.token(token_id).map(|t| t.metadata_reference.as_str())
    }

    /// Identity credential id recorded when `token_id` was minted.
    pub fn soulbound_reference(&self, token_id: TokenId) -> Result<IdentityTokenId, BadgeError> {
        self.token(token_id).map(|t| t.identity_token_id)
    }

    /// Original minter of `token_id`.
    pub fn minted_by(&self, token_id: TokenId) -> Result<Address, BadgeError> {
        self.token(token_id).map(|t| t.minted_by)
    }

    /// Has `address` ever minted a badge?
    #[must_use]
    pub fn has_minted(&self, address: Address) -> bool {
        self.has_minted.contains(&address)
    }

    /// Single-token approval for `token_id`.
    pub fn get_approved(&self, token_id: TokenId) -> Result<Option<Address>, BadgeError> {
        self.token(token_id)?;
        Ok(self.token_approvals.get(&token_id).copied())
    }

    /// Is `operator` allowed to manage all of `owner`'s badges?
    #[must_use]
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.contains(&(owner, operator))
    }

    /// Global enumeration.
    pub fn token_by_index(&self, index: u64) -> Result<TokenId, BadgeError> {
        let len = self.total_supply();
        if index < len {
            Ok(index)
        } else {
            Err(BadgeError::IndexOutOfBounds { index, len })
        }
    }

    /// Per-owner enumeration, ascending by id.
    pub fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Result<TokenId, BadgeError> {
        let len = self.balance_of(owner);
        usize::try_from(index)
            .ok()
            .and_then(|i| self.holdings.get(&owner)?.iter().nth(i).copied())
            .ok_or(BadgeError::IndexOutOfBounds { index, len })
    }

    /// Ids currently owned by `owner`, ascending.
    #[must_use]
    pub fn tokens_of_owner(&self, owner: Address) -> Vec<TokenId> {
        self.holdings
            .get(&owner)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Badges currently held by `owner`.
    #[must_use]
    pub fn badges_of(&self, owner: Address) -> Vec<BadgeInfo> {
        self.holdings
            .get(&owner)
            .into_iter()
            .flatten()
            .filter_map(|id| self.token(*id).ok())
            .map(BadgeInfo::from)
            .collect()
    }

    /// Event journal.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn move_holding(&mut self, from: Address, to: Address, token_id: TokenId) {
        if let Some(ids) = self.holdings.get_mut(&from) {
            ids.remove(&token_id);
            if ids.is_empty() {
                self.holdings.remove(&from);
            }
        }
        self.holdings.entry(to).or_default().insert(token_id);
    }
}

// =============================================================================
// BADGE LEDGER
// =============================================================================

/// Badge state machine bound to an identity registry.
#[derive(Debug)]
pub struct BadgeLedger<R> {
    state: LedgerState,
    registry: R,
}

impl<R: IdentityRegistry> BadgeLedger<R> {
    /// Creates an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns the first [`LedgerConfig::validate`] failure.
    pub fn new(config: &LedgerConfig, registry: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: LedgerState::new(config),
            registry,
        })
    }

    /// Committed state.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// The identity registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// `holds_verified_identity(address) && !has_minted(address)`, asked fresh.
    #[must_use]
    pub fn is_eligible_for_badge(&self, address: Address) -> bool {
        !self.state.has_minted(address) && self.registry.holds_verified_identity(address)
    }

    /// Summary for one address.
    #[must_use]
    pub fn badge_status(&self, address: Address) -> BadgeStatus {
        let is_verified = self.registry.holds_verified_identity(address);
        let has_minted_badge = self.state.has_minted(address);
        BadgeStatus {
            is_verified,
            is_eligible_for_badge: is_verified && !has_minted_badge,
            has_minted_badge,
            badge_balance: self.state.balance_of(address),
        }
    }

    /// Mint a badge for `target`.
    ///
    /// Checks, in order: caller capability (`Unauthorized`), zero target
    /// (`InvalidRecipient`), prior mint (`AlreadyMinted`), identity
    /// (`NotEligible`). The prior-mint check comes first so that a second
    /// mint by the same address is always `AlreadyMinted`, even if its
    /// identity has since lapsed.
    pub fn mint(
        &mut self,
        target: Address,
        metadata_reference: impl Into<String>,
        requested_by: Address,
    ) -> Result<MintOutcome, BadgeError> {
        if !can_mint_for(requested_by, target, self.state.owner) {
            return Err(BadgeError::Unauthorized {
                caller: requested_by,
            });
        }
        if target.is_zero() {
            return Err(BadgeError::InvalidRecipient(target));
        }
        if self.state.has_minted(target) {
            return Err(BadgeError::AlreadyMinted { address: target });
        }
        if !self.registry.holds_verified_identity(target) {
            return Err(BadgeError::NotEligible { address: target });
        }
        let identity_token_id = self
            .registry
            .identity_token_of(target)
            .ok_or(BadgeError::NotEligible { address: target })?;

        let token_id = self.state.next_token_id();
        self.state.tokens.push(BadgeToken::new(
            token_id,
            target,
            metadata_reference,
            identity_token_id,
        ));
        self.state.holdings.entry(target).or_default().insert(token_id);
        self.state.has_minted.insert(target);
        self.state.events.append(LedgerEvent::Transfer {
            from: Address::ZERO,
            to: target,
            token_id,
        });
        self.state.events.append(LedgerEvent::BadgeMinted {
            owner: target,
            token_id,
            identity_token_id,
        });

        Ok(MintOutcome {
            token_id,
            identity_token_id,
        })
    }

    /// Owner-initiated mint on behalf of `to`.
    pub fn safe_mint(
        &mut self,
        caller: Address,
        to: Address,
        metadata_reference: impl Into<String>,
    ) -> Result<MintOutcome, BadgeError> {
        self.mint(to, metadata_reference, caller)
    }

    /// Self-service mint.
    pub fn mint_badge(
        &mut self,
        caller: Address,
        metadata_reference: impl Into<String>,
    ) -> Result<MintOutcome, BadgeError> {
        self.mint(caller, metadata_reference, caller)
    }

    /// Move `token_id` from `from` to `to` on behalf of `caller`.
    ///
    /// `caller` must be `from`, the token's approved address, or an operator
    /// of `from`. Clears the single-token approval.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        let owner = self.state.owner_of(token_id)?;
        let index = usize::try_from(token_id).map_err(|_| BadgeError::InvalidToken(token_id))?;
        if owner != from {
            return Err(BadgeError::NotOwner { caller, token_id });
        }
        let approved = self.state.token_approvals.get(&token_id).copied();
        let is_operator = self.state.is_approved_for_all(owner, caller);
        if !can_move_token(caller, owner, approved, is_operator) {
            return Err(BadgeError::NotOwner { caller, token_id });
        }
        if to.is_zero() {
            return Err(BadgeError::InvalidRecipient(to));
        }

        self.state.token_approvals.remove(&token_id);
        self.state.move_holding(from, to, token_id);
        self.state.tokens[index].owner = to;
        self.state.events.append(LedgerEvent::Transfer {
            from,
            to,
            token_id,
        });
        Ok(())
    }

    /// Owner-initiated transfer (`caller == current_owner`).
    pub fn transfer(
        &mut self,
        current_owner: Address,
        new_owner: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        self.transfer_from(current_owner, current_owner, new_owner, token_id)
    }

    /// Set or clear (zero `approved`) the single-token approval.
    pub fn approve(
        &mut self,
        caller: Address,
        approved: Address,
        token_id: TokenId,
    ) -> Result<(), BadgeError> {
        let owner = self.state.owner_of(token_id)?;
        if !can_approve(caller, owner, self.state.is_approved_for_all(owner, caller)) {
            return Err(BadgeError::Unauthorized { caller });
        }

        if approved.is_zero() {
            self.state.token_approvals.remove(&token_id);
        } else {
            self.state.token_approvals.insert(token_id, approved);
        }
        self.state.events.append(LedgerEvent::Approval {
            owner,
            approved,
            token_id,
        });
        Ok(())
    }

    /// Grant or revoke `operator` over all of `caller`'s badges.
    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), BadgeError> {
        if operator.is_zero() || operator == caller {
            return Err(BadgeError::InvalidOperator(operator));
        }

        if approved {
            self.state.operator_approvals.insert((caller, operator));
        } else {
            self.state.operator_approvals.remove(&(caller, operator));
        }
        self.state.events.append(LedgerEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Hand contract ownership to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), BadgeError> {
        if caller != self.state.owner {
            return Err(BadgeError::Unauthorized { caller });
        }
        if new_owner.is_zero() {
            return Err(BadgeError::InvalidRecipient(new_owner));
        }

        let previous_owner = std::mem::replace(&mut self.state.owner, new_owner);
        self.state.events.append(LedgerEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # In-Memory Identity Registry
//!
//! Soulbound identity credentials held in memory. Used by tests and local
//! wiring; a deployment would adapt the real registry behind the same
//! `IdentityRegistry` port.
//!
//! Credentials are non-transferable: there is no transfer operation, only
//! issuance and revocation by the registry owner.

use crate::domain::value_objects::{Address, IdentityTokenId};
use crate::ports::outbound::IdentityRegistry;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Identity registry rejections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Only the registry owner may issue or revoke.
    #[error("unauthorized registry caller: {0}")]
    Unauthorized(Address),

    /// Holder already has a credential.
    #[error("{0} already holds an identity")]
    AlreadyVerified(Address),

    /// Holder has no credential to revoke.
    #[error("{0} holds no identity")]
    NotVerified(Address),

    /// Credentials cannot be bound to the zero address.
    #[error("cannot issue identity to the zero address")]
    ZeroHolder,
}

#[derive(Debug, Clone)]
struct Credential {
    token_id: IdentityTokenId,
    token_uri: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    credentials: HashMap<Address, Credential>,
    next_token_id: IdentityTokenId,
}

/// In-memory soulbound identity registry.
#[derive(Debug)]
pub struct InMemoryIdentityRegistry {
    owner: Address,
    inner: RwLock<RegistryInner>,
}

impl InMemoryIdentityRegistry {
    /// Create an empty registry administered by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Registry administrator.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Issue a credential to `holder`. Ids are sequential from 0 and never
    /// reused, even after revocation.
    pub fn issue(
        &self,
        caller: Address,
        holder: Address,
        token_uri: impl Into<String>,
    ) -> Result<IdentityTokenId, RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::Unauthorized(caller));
        }
        if holder.is_zero() {
            return Err(RegistryError::ZeroHolder);
        }

        let mut inner = self.inner.write();
        if inner.credentials.contains_key(&holder) {
            return Err(RegistryError::AlreadyVerified(holder));
        }
        let token_id = inner.next_token_id;
        inner.next_token_id += 1;
        inner.credentials.insert(
            holder,
            Credential {
                token_id,
                token_uri: token_uri.into(),
            },
        );
        debug!(%holder, token_id, "Identity credential issued");
        Ok(token_id)
    }

    /// Revoke `holder`'s credential.
    pub fn revoke(&self, caller: Address, holder: Address) -> Result<IdentityTokenId, RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::Unauthorized(caller));
        }
        let removed = self
            .inner
            .write()
            .credentials
            .remove(&holder)
            .ok_or(RegistryError::NotVerified(holder))?;
        debug!(%holder, token_id = removed.token_id, "Identity credential revoked");
        Ok(removed.token_id)
    }

    /// Metadata reference of `holder`'s credential.
    #[must_use]
    pub fn token_uri_of(&self, holder: Address) -> Option<String> {
        self.inner
            .read()
            .credentials
            .get(&holder)
            .map(|c| c.token_uri.clone())
    }

    /// Number of credentials currently held.
    #[must_use]
    pub fn verified_count(&self) -> usize {
        self.inner.read().credentials.len()
    }
}

impl IdentityRegistry for InMemoryIdentityRegistry {
    fn identity_token_of(&self, holder: Address) -> Option<IdentityTokenId> {
        self.inner.read().credentials.get(&holder).map(|c| c.token_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

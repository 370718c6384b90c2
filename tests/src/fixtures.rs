//! Shared test setup.

use badge_ledger::prelude::*;
use std::sync::Arc;

/// Contract owner used by every fixture.
pub const OWNER: Address = Address::repeat_byte(0xaa);

/// Identity registry address recorded in the ledger config.
pub const REGISTRY: Address = Address::repeat_byte(0xbb);

/// Metadata reference used by scenario mints.
pub const BADGE_URI: &str = "ipfs://badge-uri";

/// Metadata reference used for identity credentials.
pub const IDENTITY_URI: &str = "ipfs://identity-uri";

/// Shared in-memory identity registry.
pub type SharedRegistry = Arc<InMemoryIdentityRegistry>;

/// `n`-th distinct non-zero test address.
#[must_use]
pub fn user(n: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0x10;
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

/// Fresh service plus a handle to its identity registry.
#[must_use]
pub fn badge_service() -> (BadgeService<SharedRegistry>, SharedRegistry) {
    let registry = Arc::new(InMemoryIdentityRegistry::new(OWNER));
    let service = BadgeService::new(&LedgerConfig::new(OWNER, REGISTRY), Arc::clone(&registry))
        .unwrap_or_else(|e| panic!("fixture config must be valid: {e}"));
    (service, registry)
}

/// Fresh bare ledger plus a handle to its identity registry.
#[must_use]
pub fn badge_ledger() -> (BadgeLedger<SharedRegistry>, SharedRegistry) {
    let registry = Arc::new(InMemoryIdentityRegistry::new(OWNER));
    let ledger = BadgeLedger::new(&LedgerConfig::new(OWNER, REGISTRY), Arc::clone(&registry))
        .unwrap_or_else(|e| panic!("fixture config must be valid: {e}"));
    (ledger, registry)
}

/// Issue an identity credential to `holder`.
///
/// # Errors
///
/// Registry rejection (e.g. already verified).
pub fn verify(registry: &InMemoryIdentityRegistry, holder: Address) -> anyhow::Result<IdentityTokenId> {
    Ok(registry.issue(OWNER, holder, IDENTITY_URI)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_addresses_are_distinct_and_non_zero() {
        assert_ne!(user(0), user(1));
        assert!(!user(0).is_zero());
        assert_ne!(user(7), OWNER);
    }
}

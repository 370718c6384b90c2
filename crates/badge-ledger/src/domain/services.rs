//! # Domain Services
//!
//! Authorization predicates evaluated per call. Capabilities are checked
//! explicitly against the caller; there are no roles.

use crate::domain::value_objects::Address;

/// Owner-or-self mint capability.
///
/// The contract owner may mint on behalf of anyone; any other caller may
/// only mint for itself.
#[must_use]
pub fn can_mint_for(requested_by: Address, target: Address, contract_owner: Address) -> bool {
    requested_by == contract_owner || requested_by == target
}

/// Owner-or-delegate transfer capability.
///
/// `approved` is the token's single-token approval, `is_operator` whether
/// the caller holds an operator approval from `owner`.
#[must_use]
pub fn can_move_token(
    caller: Address,
    owner: Address,
    approved: Option<Address>,
    is_operator: bool,
) -> bool {
    caller == owner || approved == Some(caller) || is_operator
}

/// Who may set the single-token approval: the owner or one of its operators.
#[must_use]
pub fn can_approve(caller: Address, owner: Address, is_operator: bool) -> bool {
    caller == owner || is_operator
}

//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the two identifier namespaces of the ledger.
//! These prevent accidental identifier confusion — you cannot pass an
//! `AccountId` where an `OrderId` is expected.
//!
//! ## The Nil Account
//!
//! The depositor names a counterparty on every deposit; a nil (all-zero)
//! account is the "null identity" and is rejected as a seller. `AccountId`
//! exposes the sentinel explicitly rather than hiding it behind `Option`,
//! because callers hand identities across a serialization boundary where
//! the zero value is what actually arrives.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant account (buyer, seller, arbiter,
/// or the ledger's own custody account).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil account — the null identity no real participant holds.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil account.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

/// Caller-supplied key identifying an order for the lifetime of the ledger.
///
/// Order ids are chosen by depositors, not generated — the ledger only
/// enforces that a key is never reused. Nothing does arithmetic on the
/// value; it is an opaque map key with a total order so the order table
/// iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u128);

impl OrderId {
    /// The raw key value.
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<u128> for OrderId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accounts_are_distinct() {
        assert_ne!(AccountId::new(), AccountId::new());
    }

    #[test]
    fn nil_account_is_nil() {
        assert!(AccountId::nil().is_nil());
        assert!(!AccountId::new().is_nil());
    }

    #[test]
    fn account_display_is_prefixed() {
        let id = AccountId::new();
        assert!(format!("{id}").starts_with("account:"));
    }

    #[test]
    fn order_id_from_u128_roundtrip() {
        let id = OrderId::from(42);
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn order_ids_order_by_value() {
        assert!(OrderId::from(1) < OrderId::from(2));
    }

    #[test]
    fn account_serde_roundtrip() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn order_id_serde_roundtrip() {
        let id = OrderId::from(u128::MAX);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}

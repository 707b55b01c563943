//! # Arbiter Authorization
//!
//! The dispute-resolution capability is an authorization predicate
//! injected at ledger construction, not a mutable owner field on the
//! ledger itself. Substituting a fake policy in tests, or a
//! committee-backed policy in production, requires no ledger changes.

use escrow_core::AccountId;

/// Decides whether an account holds the arbiter capability.
pub trait ArbiterPolicy {
    /// Whether `account` may force-resolve disputed orders.
    fn is_arbiter(&self, account: &AccountId) -> bool;
}

/// Any plain predicate is a policy.
impl<F> ArbiterPolicy for F
where
    F: Fn(&AccountId) -> bool,
{
    fn is_arbiter(&self, account: &AccountId) -> bool {
        self(account)
    }
}

/// The simplest policy: exactly one account is the arbiter.
#[derive(Debug, Clone)]
pub struct SingleArbiter(AccountId);

impl SingleArbiter {
    /// Create a policy granting the capability to `account` alone.
    pub fn new(account: AccountId) -> Self {
        Self(account)
    }

    /// The privileged account.
    pub fn account(&self) -> &AccountId {
        &self.0
    }
}

impl ArbiterPolicy for SingleArbiter {
    fn is_arbiter(&self, account: &AccountId) -> bool {
        self.0 == *account
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_arbiter_accepts_only_its_account() {
        let arbiter = AccountId::new();
        let policy = SingleArbiter::new(arbiter);
        assert!(policy.is_arbiter(&arbiter));
        assert!(!policy.is_arbiter(&AccountId::new()));
    }

    #[test]
    fn closures_are_policies() {
        let policy = |_: &AccountId| true;
        assert!(policy.is_arbiter(&AccountId::new()));

        let deny_all = |_: &AccountId| false;
        assert!(!deny_all.is_arbiter(&AccountId::new()));
    }
}

//! # Collateral Transfer Seam
//!
//! The ledger never moves value itself — it delegates to an
//! [`AssetTransfer`] collaborator and treats any decline as grounds to
//! abort the whole operation. The trait mirrors the two capabilities the
//! ledger consumes: a direct custody payout (`transfer`) and an
//! allowance-backed pull from the depositor (`transfer_from`).
//!
//! [`InMemoryAssets`] is the reference implementation: a balances and
//! allowances table with check-everything-then-mutate semantics, used by
//! the test suites and by embedders that do not bring their own asset
//! backend.

use std::collections::BTreeMap;

use thiserror::Error;

use escrow_core::{AccountId, Amount};

// ─── Errors ──────────────────────────────────────────────────────────

/// A declined or failed asset movement.
///
/// Any of these aborts the ledger operation that requested the transfer;
/// the ledger never retries internally.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The source account does not hold the requested amount.
    #[error("{account} holds {available}, cannot transfer {requested}")]
    InsufficientBalance {
        /// The source account.
        account: AccountId,
        /// The requested amount.
        requested: Amount,
        /// The amount actually held.
        available: Amount,
    },

    /// The spender's allowance from the owner does not cover the amount.
    #[error("{spender} is allowed {available} from {owner}, cannot pull {requested}")]
    InsufficientAllowance {
        /// The account whose funds would move.
        owner: AccountId,
        /// The account spending the allowance.
        spender: AccountId,
        /// The requested amount.
        requested: Amount,
        /// The remaining allowance.
        available: Amount,
    },

    /// The collaborator refused the transfer for its own reasons.
    #[error("transfer declined: {0}")]
    Declined(String),
}

// ─── Transfer Capability ─────────────────────────────────────────────

/// Fungible-asset movement between accounts.
///
/// Implementations must be atomic per call: a returned error means no
/// balance or allowance changed.
pub trait AssetTransfer {
    /// Move `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Move `amount` from `owner` to `to`, spending `spender`'s
    /// pre-authorized allowance from `owner`.
    fn transfer_from(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

// ─── In-Memory Reference Implementation ──────────────────────────────

/// Balances-and-allowances table backing the ledger in tests and
/// self-contained deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    balances: BTreeMap<AccountId, Amount>,
    allowances: BTreeMap<(AccountId, AccountId), Amount>,
}

impl InMemoryAssets {
    /// Create an empty asset table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air. Test and bootstrap
    /// convenience; saturates at the maximum representable balance.
    pub fn mint(&mut self, account: &AccountId, amount: Amount) {
        let balance = self.balances.entry(*account).or_insert(Amount::ZERO);
        *balance = balance.checked_add(amount).unwrap_or(Amount::new(u128::MAX));
    }

    /// Authorize `spender` to pull up to `amount` from `owner`.
    /// Overwrites any previous allowance for the pair.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// The balance held by `account`.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// The remaining allowance `spender` may pull from `owner`.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Debit-and-credit after all checks have passed.
    fn move_unchecked(&mut self, from: &AccountId, to: &AccountId, amount: Amount) {
        let from_balance = self.balance_of(from);
        // Checked by every caller; a failure here would be a table corruption.
        let debited = from_balance.checked_sub(amount).unwrap_or(Amount::ZERO);
        self.balances.insert(*from, debited);
        let to_balance = self.balance_of(to);
        let credited = to_balance.checked_add(amount).unwrap_or(Amount::new(u128::MAX));
        self.balances.insert(*to, credited);
    }
}

impl AssetTransfer for InMemoryAssets {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                account: *from,
                requested: amount,
                available,
            });
        }
        if self.balance_of(to).checked_add(amount).is_none() {
            return Err(TransferError::Declined(format!(
                "crediting {amount} to {to} would overflow its balance"
            )));
        }
        self.move_unchecked(from, to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(TransferError::InsufficientAllowance {
                owner: *owner,
                spender: *spender,
                requested: amount,
                available: allowed,
            });
        }
        let available = self.balance_of(owner);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                account: *owner,
                requested: amount,
                available,
            });
        }
        if self.balance_of(to).checked_add(amount).is_none() {
            return Err(TransferError::Declined(format!(
                "crediting {amount} to {to} would overflow its balance"
            )));
        }
        // All checks passed; both mutations commit together.
        let remaining = allowed.checked_sub(amount).unwrap_or(Amount::ZERO);
        self.allowances.insert((*owner, *spender), remaining);
        self.move_unchecked(owner, to, amount);
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

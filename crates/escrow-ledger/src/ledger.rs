//! # Escrow Ledger
//!
//! Holds custody of deposited value per order and releases it to exactly
//! one of {seller, buyer} under the authorization rules below, with an
//! arbitration override.
//!
//! ## Operations
//!
//! | operation         | authorized caller | transition            | funds move to |
//! |-------------------|-------------------|-----------------------|---------------|
//! | `deposit`         | anyone (buyer)    | — → `Created`         | custody       |
//! | `release`         | the buyer         | `Created → Released`  | seller        |
//! | `refund`          | the seller        | `Created → Refunded`  | buyer         |
//! | `resolve_dispute` | the arbiter       | `Created →` either    | the receiver  |
//!
//! ## Atomicity
//!
//! Every operation is validate → invoke the asset collaborator → commit.
//! All fallible work happens before the first ledger mutation; the commit
//! (state flip, event append) cannot fail. A declined transfer therefore
//! leaves the ledger exactly as it was — no partial deposit, no partial
//! release. Operations take `&mut self`, so calls on one ledger are
//! serialized by ownership and only one terminal transition per order can
//! ever succeed.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use escrow_core::{AccountId, Amount, OrderId};

use crate::arbiter::ArbiterPolicy;
use crate::assets::{AssetTransfer, TransferError};
use crate::events::{EventLog, EventRecord, LedgerEvent};
use crate::order::{Order, OrderState};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors arising from ledger operations.
///
/// Every precondition violation aborts the whole operation with no
/// partial mutation; the ledger is never observed in an intermediate
/// state. Nothing is retried or recovered internally.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The named seller is the nil account.
    #[error("seller must not be the nil account")]
    InvalidSeller,

    /// The deposit amount is zero.
    #[error("escrowed amount must be strictly positive")]
    InvalidAmount,

    /// The order key has already been used.
    #[error("order {order_id} already exists")]
    DuplicateOrder {
        /// The reused key.
        order_id: OrderId,
    },

    /// No order exists under the given key.
    #[error("order {order_id} not found")]
    OrderNotFound {
        /// The unknown key.
        order_id: OrderId,
    },

    /// The caller does not hold the role the operation requires.
    #[error("{caller} is not authorized to {operation} order {order_id}")]
    NotAuthorized {
        /// The order key.
        order_id: OrderId,
        /// The rejected caller.
        caller: AccountId,
        /// The attempted operation.
        operation: &'static str,
    },

    /// The order is already in a terminal state.
    #[error("cannot {operation} order {order_id} in state {state}")]
    InvalidState {
        /// The order key.
        order_id: OrderId,
        /// The attempted operation.
        operation: &'static str,
        /// The current (terminal) state.
        state: OrderState,
    },

    /// The dispute receiver is neither the buyer nor the seller.
    #[error("{receiver} is neither buyer nor seller of order {order_id}")]
    InvalidReceiver {
        /// The order key.
        order_id: OrderId,
        /// The rejected receiver.
        receiver: AccountId,
    },

    /// The collateral-transfer collaborator declined.
    #[error("collateral transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

// ─── Ledger ──────────────────────────────────────────────────────────

/// The escrow order table, its custody account, and its audit log.
///
/// Value movement is delegated to the injected [`AssetTransfer`]
/// collaborator; dispute authority to the injected [`ArbiterPolicy`].
/// Orders are never deleted — terminal orders remain for audit and query.
pub struct EscrowLedger<A: AssetTransfer> {
    custody: AccountId,
    arbiter: Box<dyn ArbiterPolicy + Send + Sync>,
    assets: A,
    orders: BTreeMap<OrderId, Order>,
    events: EventLog,
}

impl<A: AssetTransfer> std::fmt::Debug for EscrowLedger<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EscrowLedger")
            .field("custody", &self.custody)
            .field("orders", &self.orders.len())
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<A: AssetTransfer> EscrowLedger<A> {
    /// Create a ledger with its custody account, arbiter policy, and
    /// asset collaborator.
    pub fn new(
        custody: AccountId,
        arbiter: impl ArbiterPolicy + Send + Sync + 'static,
        assets: A,
    ) -> Self {
        Self {
            custody,
            arbiter: Box::new(arbiter),
            assets,
            orders: BTreeMap::new(),
            events: EventLog::new(),
        }
    }

    /// Create an order and pull its funds into custody.
    ///
    /// The caller becomes the order's buyer. The pull uses the caller's
    /// pre-authorized allowance for the custody account
    /// ([`AssetTransfer::transfer_from`]).
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidSeller`] for a nil seller,
    /// [`LedgerError::InvalidAmount`] for a zero amount,
    /// [`LedgerError::DuplicateOrder`] for a reused key, and
    /// [`LedgerError::Transfer`] when the collaborator declines — in which
    /// case no order is created.
    pub fn deposit(
        &mut self,
        order_id: OrderId,
        caller: AccountId,
        seller: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if seller.is_nil() {
            return Err(LedgerError::InvalidSeller);
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        if self.orders.contains_key(&order_id) {
            return Err(LedgerError::DuplicateOrder { order_id });
        }
        let custody = self.custody;
        self.assets
            .transfer_from(&caller, &custody, &custody, amount)?;

        // Commit. Nothing below can fail.
        self.orders
            .insert(order_id, Order::new(order_id, caller, seller, amount));
        self.events.append(LedgerEvent::Deposited {
            order_id,
            buyer: caller,
            seller,
            amount,
        });
        debug!(%order_id, buyer = %caller, seller = %seller, %amount, "order deposited");
        Ok(())
    }

    /// Pay the escrowed funds out to the seller. Buyer-only.
    ///
    /// # Errors
    ///
    /// [`LedgerError::OrderNotFound`], [`LedgerError::NotAuthorized`] when
    /// the caller is not the buyer, [`LedgerError::InvalidState`] once the
    /// order is terminal, and [`LedgerError::Transfer`] when the payout is
    /// declined — in which case the order stays `Created`.
    pub fn release(&mut self, order_id: OrderId, caller: AccountId) -> Result<(), LedgerError> {
        let order = self
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound { order_id })?;
        let (buyer, seller, amount) = (order.buyer, order.seller, order.amount);
        if caller != buyer {
            return Err(LedgerError::NotAuthorized {
                order_id,
                caller,
                operation: "release",
            });
        }
        if order.state.is_terminal() {
            return Err(LedgerError::InvalidState {
                order_id,
                operation: "release",
                state: order.state,
            });
        }
        let custody = self.custody;
        self.assets.transfer(&custody, &seller, amount)?;

        self.settle(order_id, OrderState::Released);
        self.events.append(LedgerEvent::Released {
            order_id,
            seller,
            amount,
        });
        debug!(%order_id, seller = %seller, %amount, "order released");
        Ok(())
    }

    /// Return the escrowed funds to the buyer. Seller-only.
    ///
    /// # Errors
    ///
    /// Same surface as [`release`](EscrowLedger::release), with the seller
    /// as the authorized caller.
    pub fn refund(&mut self, order_id: OrderId, caller: AccountId) -> Result<(), LedgerError> {
        let order = self
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound { order_id })?;
        let (buyer, seller, amount) = (order.buyer, order.seller, order.amount);
        if caller != seller {
            return Err(LedgerError::NotAuthorized {
                order_id,
                caller,
                operation: "refund",
            });
        }
        if order.state.is_terminal() {
            return Err(LedgerError::InvalidState {
                order_id,
                operation: "refund",
                state: order.state,
            });
        }
        let custody = self.custody;
        self.assets.transfer(&custody, &buyer, amount)?;

        self.settle(order_id, OrderState::Refunded);
        self.events.append(LedgerEvent::Refunded {
            order_id,
            buyer,
            amount,
        });
        debug!(%order_id, buyer = %buyer, %amount, "order refunded");
        Ok(())
    }

    /// Force-resolve a disputed order in favor of one party. Arbiter-only.
    ///
    /// Awarding the seller behaves as a release; awarding the buyer as a
    /// refund. Emits the underlying `Released`/`Refunded` fact and a
    /// `DisputeResolved` fact.
    ///
    /// The capability check runs before the existence check, so a
    /// non-arbiter probing an unused key learns nothing about the table.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotAuthorized`] when the caller lacks the arbiter
    /// capability, [`LedgerError::OrderNotFound`],
    /// [`LedgerError::InvalidState`] once terminal,
    /// [`LedgerError::InvalidReceiver`] when the receiver is neither
    /// party, and [`LedgerError::Transfer`] on a declined payout.
    pub fn resolve_dispute(
        &mut self,
        order_id: OrderId,
        receiver: AccountId,
        caller: AccountId,
    ) -> Result<(), LedgerError> {
        if !self.arbiter.is_arbiter(&caller) {
            return Err(LedgerError::NotAuthorized {
                order_id,
                caller,
                operation: "resolve_dispute",
            });
        }
        let order = self
            .orders
            .get(&order_id)
            .ok_or(LedgerError::OrderNotFound { order_id })?;
        let (buyer, seller, amount) = (order.buyer, order.seller, order.amount);
        if order.state.is_terminal() {
            return Err(LedgerError::InvalidState {
                order_id,
                operation: "resolve_dispute",
                state: order.state,
            });
        }
        if receiver != buyer && receiver != seller {
            return Err(LedgerError::InvalidReceiver { order_id, receiver });
        }
        let custody = self.custody;
        self.assets.transfer(&custody, &receiver, amount)?;

        if receiver == seller {
            self.settle(order_id, OrderState::Released);
            self.events.append(LedgerEvent::Released {
                order_id,
                seller,
                amount,
            });
        } else {
            self.settle(order_id, OrderState::Refunded);
            self.events.append(LedgerEvent::Refunded {
                order_id,
                buyer,
                amount,
            });
        }
        self.events.append(LedgerEvent::DisputeResolved {
            order_id,
            winner: receiver,
            amount,
        });
        debug!(%order_id, winner = %receiver, %amount, "dispute resolved");
        Ok(())
    }

    /// Look up an order. Read-only, no authorization required.
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Number of orders ever created.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// The audit trail, in commit order.
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    /// The audit log itself, for per-order queries.
    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    /// The ledger's custody account.
    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    /// The asset collaborator.
    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Mutable access to the asset collaborator, for embedders that fund
    /// accounts or grant allowances through the ledger's instance.
    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    /// Flip an already-validated order to a terminal state.
    fn settle(&mut self, order_id: OrderId, to: OrderState) {
        if let Some(order) = self.orders.get_mut(&order_id) {
            order.settle(to);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

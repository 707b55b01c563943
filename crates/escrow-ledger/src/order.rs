//! # Order State Machine
//!
//! Models a single escrowed order between a buyer and a seller.
//!
//! ## States
//!
//! ```text
//! Created ──release()──▶ Released (terminal)
//!    │
//!    └────refund()─────▶ Refunded (terminal)
//! ```
//!
//! Both transitions are one-way: once an order is terminal, no further
//! transition is legal and the ledger holds none of its funds.

use serde::{Deserialize, Serialize};

use escrow_core::{AccountId, Amount, OrderId, Timestamp};

// ─── Order State ─────────────────────────────────────────────────────

/// The settlement state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Funds are held in ledger custody.
    Created,
    /// Funds have been paid out to the seller (terminal).
    Released,
    /// Funds have been returned to the buyer (terminal).
    Refunded,
}

impl OrderState {
    /// Whether this state is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Refunded)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Released => "RELEASED",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Order ───────────────────────────────────────────────────────────

/// A single escrowed-value record between a buyer and a seller.
///
/// Orders are created by `deposit` and retained forever — terminal orders
/// stay in the ledger for audit and query. The parties and amount are
/// fixed at creation; only `state` and `resolved_at` change afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Caller-supplied order key, unique for the lifetime of the ledger.
    pub id: OrderId,
    /// The depositor. Fixed at creation.
    pub buyer: AccountId,
    /// The counterparty. Fixed at creation.
    pub seller: AccountId,
    /// The escrowed quantity. Strictly positive, fixed at creation.
    pub amount: Amount,
    /// Current settlement state.
    pub state: OrderState,
    /// When the deposit was accepted.
    pub created_at: Timestamp,
    /// When the order reached a terminal state, if it has.
    pub resolved_at: Option<Timestamp>,
}

impl Order {
    /// Create a new order in the `Created` state.
    pub(crate) fn new(id: OrderId, buyer: AccountId, seller: AccountId, amount: Amount) -> Self {
        Self {
            id,
            buyer,
            seller,
            amount,
            state: OrderState::Created,
            created_at: Timestamp::now(),
            resolved_at: None,
        }
    }

    /// Whether the given account is the buyer or the seller of this order.
    pub fn is_party(&self, account: &AccountId) -> bool {
        self.buyer == *account || self.seller == *account
    }

    /// Whether the order is settled (terminal state).
    pub fn is_settled(&self) -> bool {
        self.state.is_terminal()
    }

    /// Flip the order to a terminal state and stamp the resolution time.
    pub(crate) fn settle(&mut self, to: OrderState) {
        debug_assert!(to.is_terminal());
        self.state = to;
        self.resolved_at = Some(Timestamp::now());
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

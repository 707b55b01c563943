//! # Audit Events
//!
//! Append-only change feed the ledger writes on every committed operation.
//! Records are ordered by operation completion and never mutated or
//! re-read as control input — they exist for audit and downstream
//! consumers only.
//!
//! The sequence number is the authoritative ordering. Timestamps are at
//! seconds precision, so two records may share a timestamp; their sequence
//! numbers still disambiguate.

use serde::{Deserialize, Serialize};

use escrow_core::{AccountId, Amount, OrderId, Timestamp};

// ─── Events ──────────────────────────────────────────────────────────

/// A fact the ledger emits when an operation commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// An order was created and its funds moved into custody.
    Deposited {
        /// The order key.
        order_id: OrderId,
        /// The depositor.
        buyer: AccountId,
        /// The counterparty.
        seller: AccountId,
        /// The escrowed quantity.
        amount: Amount,
    },
    /// Custody funds were paid out to the seller.
    Released {
        /// The order key.
        order_id: OrderId,
        /// The payout recipient.
        seller: AccountId,
        /// The quantity paid out.
        amount: Amount,
    },
    /// Custody funds were returned to the buyer.
    Refunded {
        /// The order key.
        order_id: OrderId,
        /// The refund recipient.
        buyer: AccountId,
        /// The quantity returned.
        amount: Amount,
    },
    /// The arbiter force-resolved a disputed order.
    DisputeResolved {
        /// The order key.
        order_id: OrderId,
        /// The party the funds went to.
        winner: AccountId,
        /// The quantity awarded.
        amount: Amount,
    },
}

impl LedgerEvent {
    /// The order this event concerns.
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::Deposited { order_id, .. }
            | Self::Released { order_id, .. }
            | Self::Refunded { order_id, .. }
            | Self::DisputeResolved { order_id, .. } => *order_id,
        }
    }
}

/// A sequence-numbered, timestamped event in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0. Authoritative ordering.
    pub seq: u64,
    /// When the operation committed.
    pub recorded_at: Timestamp,
    /// The emitted fact.
    pub event: LedgerEvent,
}

// ─── Event Log ───────────────────────────────────────────────────────

/// The append-only audit log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning it the next sequence number.
    pub(crate) fn append(&mut self, event: LedgerEvent) {
        let seq = self.records.len() as u64;
        self.records.push(EventRecord {
            seq,
            recorded_at: Timestamp::now(),
            event,
        });
    }

    /// All records, in commit order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records concerning a single order, in commit order.
    pub fn for_order(&self, order_id: OrderId) -> impl Iterator<Item = &EventRecord> {
        self.records
            .iter()
            .filter(move |r| r.event.order_id() == order_id)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

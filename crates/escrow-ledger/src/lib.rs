//! # escrow-ledger — Escrowed Settlement with Dispute Resolution
//!
//! Implements the escrow ledger: custody of deposited value per order,
//! released to exactly one of {seller, buyer} under well-defined
//! authorization rules, with an arbitration override.
//!
//! - **Order** (`order.rs`): the order record and its three-state machine
//!   (`Created → Released | Refunded`, both terminal).
//!
//! - **Ledger** (`ledger.rs`): the order table and the four operations —
//!   `deposit`, `release`, `refund`, `resolve_dispute` — each an atomic
//!   validate → transfer → commit step.
//!
//! - **Assets** (`assets.rs`): the collateral-transfer collaborator seam
//!   and its in-memory reference implementation.
//!
//! - **Arbiter** (`arbiter.rs`): the injected authorization predicate for
//!   dispute resolution.
//!
//! - **Events** (`events.rs`): the append-only audit trail of
//!   `Deposited` / `Released` / `Refunded` / `DisputeResolved` facts.
//!
//! ## Crate Policy
//!
//! - Depends on `escrow-core` internally.
//! - No `unsafe` code; no `panic!()` or `.unwrap()` outside tests.
//! - The ledger does no IO and takes no locks — embedders bring their
//!   own synchronization for cross-order parallelism.

pub mod arbiter;
pub mod assets;
pub mod events;
pub mod ledger;
pub mod order;

pub use arbiter::{ArbiterPolicy, SingleArbiter};
pub use assets::{AssetTransfer, InMemoryAssets, TransferError};
pub use events::{EventLog, EventRecord, LedgerEvent};
pub use ledger::{EscrowLedger, LedgerError};
pub use order::{Order, OrderState};

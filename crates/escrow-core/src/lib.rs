//! # escrow-core — Foundational Types for the Escrow Ledger
//!
//! Defines the type-system primitives the ledger is built on. Every other
//! crate in the workspace depends on `escrow-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `AccountId` and `OrderId`
//!    are distinct types — an account can never be passed where an order key
//!    is expected, and vice versa.
//!
//! 2. **Checked amounts.** `Amount` is an unsigned quantity in smallest
//!    asset units with checked arithmetic only. Settlement paths can never
//!    silently wrap.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix at
//!    seconds precision, so audit records serialize deterministically.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `escrow-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod amount;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Amount;
pub use identity::{AccountId, OrderId};
pub use temporal::{Timestamp, TimestampError};

//! Transfer Engine Library
//! # Overview
//!
//! This library maintains a set of monetary accounts and atomically moves
//! funds between them under concurrent access from many callers.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, OperationRecord, TransferError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The atomic transfer protocol
//!   - [`core::store`] - Account table with per-account exclusion
//!   - [`core::lock_order`] - Deterministic lock-ordering primitive
//!   - [`core::notifier`] - Fire-and-forget post-transfer notifications
//!   - [`core::dispatcher`] - Concurrent fan-out of transfer batches
//! - [`io`] - CSV input/output with sync and async readers
//! - [`strategy`] - Pluggable sequential/concurrent processing pipelines
//!
//! # Concurrency Control
//!
//! Every account owns its own mutual-exclusion primitive; a transfer
//! acquires the two exclusions it needs in lexicographic identifier
//! order. Because the order is total, deterministic and shared by every
//! caller, two transfers over the same pair of accounts — in either
//! direction — can never wait on each other in a cycle. Validation
//! (identity, available balance) happens under both exclusions, and the
//! paired debit/credit commits before either is released, so no observer
//! ever sees a half-applied transfer.
//!
//! # Operations
//!
//! The request layer accepts two operation types from CSV input:
//!
//! - **Create**: open an account with a non-negative opening balance
//! - **Transfer**: atomically move a strictly positive amount between two
//!   distinct existing accounts

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AccountStore, Notifier, TransferEngine};
pub use io::write_accounts_csv;
pub use types::{Account, AccountId, OperationRecord, OperationType, TransferError};

//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifier and snapshot types
//! - `operation`: Parsed request-layer operation records
//! - `error`: Error types for the transfer engine

pub mod account;
pub mod error;
pub mod operation;

pub use account::{Account, AccountId};
pub use error::TransferError;
pub use operation::{OperationRecord, OperationType};

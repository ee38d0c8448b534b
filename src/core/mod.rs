//! Core business logic module
//!
//! This module contains the concurrent transfer protocol and its
//! collaborators:
//! - `store` - Authoritative account table with per-account exclusion
//! - `lock_order` - Pure, deterministic lock-ordering primitive
//! - `engine` - The atomic transfer protocol
//! - `notifier` - Fire-and-forget post-transfer notification hand-off
//! - `dispatcher` - Concurrent fan-out of transfer batches

pub mod dispatcher;
pub mod engine;
pub mod lock_order;
pub mod notifier;
pub mod store;

pub use dispatcher::{DispatchResult, TransferDispatcher};
pub use engine::TransferEngine;
pub use notifier::{ChannelNotifier, ConsoleNotifier, Notification, Notifier};
pub use store::{AccountEntry, AccountStore};

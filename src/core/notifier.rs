//! Post-transfer notification hand-off
//!
//! The transfer engine informs both parties after a successful transfer.
//! Notification is strictly fire-and-forget: the engine consumes no return
//! value, a slow or failing notifier cannot block or fail a transfer, and
//! failed notifications are never retried. Notifications are handed off
//! only after both balance writes have committed and both exclusions have
//! been released.

use crate::types::AccountId;
use std::sync::mpsc::Sender;

/// Receiver of post-transfer events
///
/// Implementations must be independently resilient: any failure stays
/// inside the implementation and is invisible to the transfer protocol.
pub trait Notifier: Send + Sync {
    /// Deliver a message to the holder of `account`
    fn notify(&self, account: &AccountId, message: &str);
}

/// A delivered notification event
///
/// Carried by [`ChannelNotifier`] to whatever consumer drains the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The account the message is addressed to
    pub account: AccountId,

    /// Human-readable description of what happened
    pub message: String,
}

/// Notifier that writes notifications to stderr
///
/// Diagnostics share stderr with per-record processing errors so that
/// stdout stays reserved for output data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, account: &AccountId, message: &str) {
        eprintln!("notify {}: {}", account, message);
    }
}

/// Notifier that hands events to an mpsc channel
///
/// The asynchronous hand-off decouples delivery from the transfer itself:
/// the send is non-blocking and a send failure (the consumer hung up) is
/// silently dropped, so a dead consumer cannot affect a committed
/// transfer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier that sends events through `sender`
    pub fn new(sender: Sender<Notification>) -> Self {
        ChannelNotifier { sender }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, account: &AccountId, message: &str) {
        let _ = self.sender.send(Notification {
            account: account.clone(),
            message: message.to_string(),
        });
    }
}

//! Transfer engine — the concurrent transfer protocol
//!
//! This module provides the `TransferEngine` that moves funds between two
//! accounts as an all-or-nothing step under concurrent access from many
//! callers.
//!
//! # Protocol
//!
//! 1. Resolve both identifiers through the store (no locks taken). Absent
//!    identifier → `UnknownAccount`; same resolved account → `SameAccount`.
//! 2. Order the two entries by identifier with [`lock_order::ordered_pair`]
//!    and acquire the lower-ordered exclusion first, then the higher. Every
//!    concurrent transfer touching the same pair orders it identically, so
//!    no cycle of waiting can form.
//! 3. Under both exclusions, re-read the source balance (it may have
//!    changed since resolution) and validate against the amount. On
//!    success, write the debit and the credit back before releasing either
//!    exclusion; any third party locking either account afterwards sees
//!    both writes or neither.
//! 4. After release, hand one notification per party to the notifier.
//!    Notifier behavior never alters the committed outcome.

use crate::core::lock_order;
use crate::core::notifier::Notifier;
use crate::core::store::AccountStore;
use crate::types::{Account, AccountId, TransferError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Atomic funds-transfer engine over a shared account store
///
/// The engine is `Send + Sync` and designed to be called concurrently from
/// many threads or tasks: all shared state lives in the store, and the
/// only blocking point is the per-account exclusions themselves.
pub struct TransferEngine {
    store: Arc<AccountStore>,
    notifier: Arc<dyn Notifier>,
}

impl TransferEngine {
    /// Create a new TransferEngine over the given store and notifier
    pub fn new(store: Arc<AccountStore>, notifier: Arc<dyn Notifier>) -> Self {
        TransferEngine { store, notifier }
    }

    /// Create a new account with the given opening balance
    ///
    /// Delegates to the store's atomic insert-if-absent contract.
    ///
    /// # Errors
    ///
    /// * `DuplicateAccount` - the identifier already exists
    /// * `InvalidOpeningBalance` - the opening balance is negative
    pub fn create_account(
        &self,
        id: impl Into<AccountId>,
        opening_balance: Decimal,
    ) -> Result<(), TransferError> {
        self.store.create(id, opening_balance)
    }

    /// Best-effort balance inquiry
    ///
    /// Does not serialize with in-flight transfers; see
    /// [`AccountStore::balance_of`].
    pub fn balance(&self, id: &str) -> Option<Decimal> {
        self.store.balance_of(id)
    }

    /// Snapshot all accounts sorted by identifier
    pub fn accounts(&self) -> Vec<Account> {
        self.store.accounts()
    }

    /// Atomically move `amount` from `source` to `destination`
    ///
    /// Either both the debit and the credit are applied or neither is; no
    /// other locker of either account ever observes an intermediate state.
    /// On success two notifications are handed off, one per party.
    ///
    /// # Arguments
    ///
    /// * `source` - Identifier of the account to debit
    /// * `destination` - Identifier of the account to credit
    /// * `amount` - Amount to move; must be strictly positive
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - amount is zero or negative. No locks taken.
    /// * `UnknownAccount` - either identifier is absent. No locks taken.
    /// * `SameAccount` - both identifiers resolve to one account. No locks
    ///   taken.
    /// * `InsufficientFunds` - the source balance, re-read under both
    ///   exclusions, is smaller than `amount`. Both locks were held; no
    ///   mutation occurred.
    /// * `ArithmeticOverflow` - a checked decimal operation failed. Both
    ///   locks were held; no mutation occurred.
    ///
    /// The engine never retries on its own; every failure is terminal for
    /// the call and all locks are released before returning.
    pub fn transfer(
        &self,
        source: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if amount <= Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }

        // Resolve both identifiers before taking any lock.
        let source_entry = self
            .store
            .get(source)
            .ok_or_else(|| TransferError::unknown_account(source))?;
        let destination_entry = self
            .store
            .get(destination)
            .ok_or_else(|| TransferError::unknown_account(destination))?;

        if source_entry.id() == destination_entry.id() {
            return Err(TransferError::same_account(source));
        }

        {
            // Acquire both exclusions in identifier order, regardless of
            // which account is source or destination for this call.
            let (first, second) = lock_order::ordered_pair(&source_entry, &destination_entry);
            let first_guard = first.lock_balance();
            let second_guard = second.lock_balance();

            // Map the ordered guards back to their roles.
            let (mut source_balance, mut destination_balance) =
                if Arc::ptr_eq(first, &source_entry) {
                    (first_guard, second_guard)
                } else {
                    (second_guard, first_guard)
                };

            // Re-read under exclusion: the balance may have changed between
            // resolution and lock acquisition.
            if *source_balance < amount {
                return Err(TransferError::insufficient_funds(
                    source,
                    *source_balance,
                    amount,
                ));
            }

            // Compute both new balances before writing either, so a failed
            // credit cannot leave a dangling debit.
            let debited = source_balance
                .checked_sub(amount)
                .ok_or_else(|| TransferError::arithmetic_overflow("debit", source))?;
            let credited = destination_balance
                .checked_add(amount)
                .ok_or_else(|| TransferError::arithmetic_overflow("credit", destination))?;

            *source_balance = debited;
            *destination_balance = credited;
            // Guards drop here: both writes are visible before release.
        }

        // Success only: fire-and-forget, after commit, never retried.
        self.notifier.notify(
            &source.to_string(),
            &format!("Transferred {} to account {}", amount, destination),
        );
        self.notifier.notify(
            &destination.to_string(),
            &format!("Received {} from account {}", amount, source),
        );

        Ok(())
    }
}

//! Account store with per-account exclusion
//!
//! This module provides the `AccountStore`, the authoritative in-memory
//! mapping of account identifier to live account record, and `AccountEntry`,
//! the live record itself.
//!
//! # Design
//!
//! The store uses `DashMap` (a concurrent HashMap) so that structural
//! operations (create, lookup) on different accounts proceed in parallel.
//! Each entry owns its balance behind a `std::sync::Mutex`: the account
//! itself is the lock granularity, and there is no separate lock table.
//! The transfer engine acquires these per-entry mutexes in a fixed
//! identifier order; the DashMap's internal shard locks are only held for
//! the duration of a lookup, never across a balance mutation.
//!
//! # Thread Safety
//!
//! Entries are handed out as `Arc<AccountEntry>`, so a caller holds a
//! resolved account without pinning any DashMap shard. A balance written
//! under an entry's exclusion is the authoritative value for that
//! identifier the moment the guard is released.

use crate::types::{Account, AccountId, TransferError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Live account record owned by the store
///
/// Carries the immutable identifier and the balance behind the account's
/// own mutual-exclusion primitive. Balance mutation is only legal while
/// the exclusion is held.
#[derive(Debug)]
pub struct AccountEntry {
    id: AccountId,
    balance: Mutex<Decimal>,
}

impl AccountEntry {
    fn new(id: AccountId, balance: Decimal) -> Self {
        AccountEntry {
            id,
            balance: Mutex::new(balance),
        }
    }

    /// The account identifier
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Acquire this account's exclusion and return the balance guard
    ///
    /// Plain blocking wait, no timeout. A poisoned mutex is recovered with
    /// `PoisonError::into_inner`: balances are only written after all
    /// validation has passed, so a panicking holder cannot have left a
    /// half-applied mutation behind.
    pub fn lock_balance(&self) -> MutexGuard<'_, Decimal> {
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the current balance
    ///
    /// Takes the exclusion briefly, so the value is never torn, but the
    /// read does not serialize with whole in-flight transfers: by the time
    /// the caller looks at the result another transfer may already have
    /// committed.
    pub fn balance(&self) -> Decimal {
        *self.lock_balance()
    }

    /// Snapshot this entry as a plain account value
    pub fn snapshot(&self) -> Account {
        Account::new(self.id.clone(), self.balance())
    }
}

/// Authoritative mapping of account identifier to live account record
///
/// Provides atomic insert-if-absent creation, handle resolution, and
/// best-effort balance reads. The store exclusively owns its entries;
/// the transfer engine mutates balances in place through the exclusion
/// each entry carries.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<AccountId, Arc<AccountEntry>>,
}

impl AccountStore {
    /// Create a new AccountStore with no accounts
    pub fn new() -> Self {
        AccountStore {
            accounts: DashMap::new(),
        }
    }

    /// Create a new account with the given opening balance
    ///
    /// Creation is atomic insert-if-absent through the DashMap entry API:
    /// two concurrent creates for the same identifier cannot both succeed.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier for the new account
    /// * `opening_balance` - Initial balance; must not be negative
    ///
    /// # Errors
    ///
    /// * `InvalidOpeningBalance` - the opening balance is negative
    /// * `DuplicateAccount` - an account with this identifier already exists
    pub fn create(
        &self,
        id: impl Into<AccountId>,
        opening_balance: Decimal,
    ) -> Result<(), TransferError> {
        let id = id.into();

        if opening_balance < Decimal::ZERO {
            return Err(TransferError::invalid_opening_balance(&id, opening_balance));
        }

        match self.accounts.entry(id) {
            Entry::Occupied(entry) => Err(TransferError::duplicate_account(entry.key())),
            Entry::Vacant(entry) => {
                let account = Arc::new(AccountEntry::new(entry.key().clone(), opening_balance));
                entry.insert(account);
                Ok(())
            }
        }
    }

    /// Resolve an identifier to its live account record
    ///
    /// Returns a handle the caller can lock; no DashMap shard lock is held
    /// once this method returns.
    pub fn get(&self, id: &str) -> Option<Arc<AccountEntry>> {
        self.accounts.get(id).map(|entry| Arc::clone(&entry))
    }

    /// Best-effort balance inquiry
    ///
    /// Returns `None` for unknown identifiers. See [`AccountEntry::balance`]
    /// for the consistency contract.
    pub fn balance_of(&self, id: &str) -> Option<Decimal> {
        self.get(id).map(|entry| entry.balance())
    }

    /// Snapshot all accounts sorted by identifier
    ///
    /// Each balance is read under its own exclusion, but the snapshot as a
    /// whole is not atomic across accounts. Sorting gives deterministic
    /// output for CSV generation.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().snapshot())
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_new_store_is_empty() {
        let store = AccountStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.accounts().len(), 0);
    }

    #[test]
    fn test_create_inserts_account_with_opening_balance() {
        let store = AccountStore::new();

        store.create("John", Decimal::new(124500, 2)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.balance_of("John"), Some(Decimal::new(124500, 2)));
    }

    #[test]
    fn test_create_with_zero_opening_balance() {
        let store = AccountStore::new();

        store.create("John", Decimal::ZERO).unwrap();

        assert_eq!(store.balance_of("John"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_create_rejects_negative_opening_balance() {
        let store = AccountStore::new();

        let result = store.create("John", Decimal::new(-100, 2));

        assert!(matches!(
            result.unwrap_err(),
            TransferError::InvalidOpeningBalance { .. }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_identifier() {
        let store = AccountStore::new();
        store.create("John", Decimal::new(10000, 2)).unwrap();

        let result = store.create("John", Decimal::new(5000, 2));

        assert_eq!(
            result.unwrap_err(),
            TransferError::duplicate_account("John")
        );
        // The original account is untouched
        assert_eq!(store.balance_of("John"), Some(Decimal::new(10000, 2)));
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let store = AccountStore::new();
        store.create("Ron", Decimal::new(12345, 2)).unwrap();

        assert!(store.get("RON").is_none());
        assert!(store.get("Ron").is_some());
    }

    #[test]
    fn test_get_returns_none_for_unknown_account() {
        let store = AccountStore::new();
        assert!(store.get("John").is_none());
        assert_eq!(store.balance_of("John"), None);
    }

    #[test]
    fn test_get_resolves_same_entry_for_same_id() {
        let store = AccountStore::new();
        store.create("John", Decimal::new(10000, 2)).unwrap();

        let first = store.get("John").unwrap();
        let second = store.get("John").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_balance_write_under_exclusion_is_visible_to_next_read() {
        let store = AccountStore::new();
        store.create("John", Decimal::new(10000, 2)).unwrap();

        let entry = store.get("John").unwrap();
        {
            let mut balance = entry.lock_balance();
            *balance = Decimal::new(5000, 2);
        }

        assert_eq!(store.balance_of("John"), Some(Decimal::new(5000, 2)));
    }

    #[test]
    fn test_accounts_snapshot_sorted_by_identifier() {
        let store = AccountStore::new();
        store.create("Ron", Decimal::new(12345, 2)).unwrap();
        store.create("Alice", Decimal::new(100, 2)).unwrap();
        store.create("John", Decimal::new(124500, 2)).unwrap();

        let accounts = store.accounts();
        let ids: Vec<&str> = accounts.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(ids, vec!["Alice", "John", "Ron"]);
    }

    #[test]
    fn test_concurrent_create_same_id_single_winner() {
        use std::thread;

        let store = Arc::new(AccountStore::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.create("John", Decimal::new(10000, 2)).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|created| *created)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.balance_of("John"), Some(Decimal::new(10000, 2)));
    }
}

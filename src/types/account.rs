//! Account-related types for the transfer engine
//!
//! This module defines the Account snapshot structure used for balance
//! inquiries and final output.

use rust_decimal::Decimal;

/// Account identifier
///
/// Immutable, unique string chosen at account creation. Identifiers are
/// case-sensitive and compared lexicographically when two accounts must
/// be locked in a fixed order.
pub type AccountId = String;

/// Account snapshot
///
/// Represents the state of an account at the moment it was read from the
/// store. The authoritative balance lives inside the store; a snapshot is
/// a plain value and never participates in locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The account identifier
    pub id: AccountId,

    /// Balance at snapshot time
    ///
    /// Never negative outside an in-flight transfer: every mutation is
    /// validated against the current balance while the account's exclusion
    /// is held.
    pub balance: Decimal,
}

impl Account {
    /// Create a new account snapshot
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        Account {
            id: id.into(),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_id_and_balance() {
        let account = Account::new("John", Decimal::new(124500, 2));

        assert_eq!(account.id, "John");
        assert_eq!(account.balance, Decimal::new(124500, 2));
    }

    #[test]
    fn test_accepts_owned_and_borrowed_ids() {
        let from_str = Account::new("Ron", Decimal::ZERO);
        let from_string = Account::new(String::from("Ron"), Decimal::ZERO);

        assert_eq!(from_str, from_string);
    }
}

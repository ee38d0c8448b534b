//! Operation types for the transfer engine request layer
//!
//! This module defines the parsed operation records that the request layer
//! hands to the processing strategies. An operation is either the creation
//! of an account with an opening balance or a transfer between two accounts.

use super::account::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation types accepted by the request layer
///
/// Creates are applied through the account store; transfers go through the
/// transfer engine, which acquires both account exclusions in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Create a new account with an opening balance
    ///
    /// Fails if the identifier already exists. The opening balance must not
    /// be negative (zero is allowed).
    Create,

    /// Move funds atomically from one account to another
    ///
    /// Requires a strictly positive amount and two distinct, existing
    /// accounts. Either both the debit and the credit are applied or
    /// neither is.
    Transfer,
}

/// Input operation record
///
/// Represents a single validated request as read from the input CSV file.
/// The destination field is only present for transfers; for creates the
/// `account` field names the account being opened and `amount` is its
/// opening balance.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// The type of operation (create or transfer)
    pub op_type: OperationType,

    /// The account this operation applies to (the source, for transfers)
    pub account: AccountId,

    /// The destination account for transfers; `None` for creates
    pub destination: Option<AccountId>,

    /// Opening balance (create) or transfer amount (transfer)
    ///
    /// Already validated at conversion time: non-negative for creates,
    /// strictly positive for transfers. The engine re-checks the transfer
    /// amount on its own.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_record_has_no_destination() {
        let record = OperationRecord {
            op_type: OperationType::Create,
            account: "John".to_string(),
            destination: None,
            amount: Decimal::new(124500, 2),
        };

        assert_eq!(record.op_type, OperationType::Create);
        assert!(record.destination.is_none());
    }

    #[test]
    fn test_transfer_record_carries_destination() {
        let record = OperationRecord {
            op_type: OperationType::Transfer,
            account: "John".to_string(),
            destination: Some("Ron".to_string()),
            amount: Decimal::new(10000, 2),
        };

        assert_eq!(record.op_type, OperationType::Transfer);
        assert_eq!(record.destination.as_deref(), Some("Ron"));
    }
}

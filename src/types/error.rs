//! Error types for the transfer engine
//!
//! This module defines all error types that can occur while creating
//! accounts and moving funds between them. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Account Errors**: unknown identifier, duplicate identifier, invalid
//!   opening balance
//! - **Transfer Errors**: same-account transfer, insufficient funds,
//!   non-positive amount, arithmetic overflow
//! - **Request Layer Errors**: malformed CSV, unknown operation types,
//!   missing fields

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the transfer engine
///
/// This enum represents all possible errors that can occur during account
/// creation and transfer processing. Each variant includes relevant context
/// to help diagnose and resolve the issue. The engine performs no internal
/// recovery beyond releasing any locks it holds before returning; every
/// error surfaces to the immediate caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// Account identifier not found in the store
    ///
    /// Detected before any lock is taken; no balance is changed.
    #[error("Account '{account}' does not exist")]
    UnknownAccount {
        /// The identifier that could not be resolved
        account: String,
    },

    /// Source and destination resolve to the same account
    ///
    /// A transfer cannot move funds within one account. Detected before
    /// any lock is taken.
    #[error("Cannot transfer within the same account '{account}'")]
    SameAccount {
        /// The identifier both sides resolved to
        account: String,
    },

    /// Source balance is smaller than the requested amount
    ///
    /// Detected while both account exclusions are held, after the balance
    /// has been re-read. Terminal for the call; the engine never retries.
    #[error("Insufficient funds in account '{account}': balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The source account identifier
        account: String,
        /// Balance observed under exclusion
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Transfer amount is zero or negative
    ///
    /// The request layer must already have rejected this; the engine guards
    /// against it as a programming-error check, distinct from
    /// `InsufficientFunds`.
    #[error("Transfer amount must be positive, got {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// An account with this identifier already exists
    ///
    /// Account creation is insert-if-absent; the existing account is left
    /// untouched.
    #[error("Account '{account}' already exists")]
    DuplicateAccount {
        /// The identifier that is already taken
        account: String,
    },

    /// Opening balance for a new account is negative
    #[error("Opening balance for account '{account}' must not be negative, got {amount}")]
    InvalidOpeningBalance {
        /// The account being created
        account: String,
        /// The offending opening balance
        amount: Decimal,
    },

    /// Checked decimal arithmetic failed
    ///
    /// Detected while both exclusions are held, before either balance is
    /// written, so no partial state is left behind.
    #[error("Arithmetic overflow in {operation} for account '{account}'")]
    ArithmeticOverflow {
        /// Operation that would overflow ("debit" or "credit")
        operation: String,
        /// The account whose balance would overflow
        account: String,
    },

    /// I/O error occurred while reading or writing
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped and
    /// processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation type encountered in the input
    ///
    /// This is a recoverable error - the record is skipped.
    #[error("Invalid operation type '{op_type}'")]
    InvalidOperation {
        /// The invalid operation type string
        op_type: String,
    },

    /// Amount field is missing or empty for an operation that requires it
    ///
    /// Both creates and transfers carry an amount. This is a recoverable
    /// error.
    #[error("{op_type} operation for account '{account}' requires an amount")]
    MissingAmount {
        /// Operation type that requires an amount
        op_type: String,
        /// Account named by the record
        account: String,
    },

    /// Destination field is missing or empty for a transfer
    ///
    /// This is a recoverable error - the record is skipped.
    #[error("Transfer from account '{account}' requires a destination account")]
    MissingDestination {
        /// The source account named by the record
        account: String,
    },
}

// Conversion from io::Error to TransferError
impl From<std::io::Error> for TransferError {
    fn from(error: std::io::Error) -> Self {
        TransferError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to TransferError
impl From<csv::Error> for TransferError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        TransferError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TransferError {
    /// Create an UnknownAccount error
    pub fn unknown_account(account: &str) -> Self {
        TransferError::UnknownAccount {
            account: account.to_string(),
        }
    }

    /// Create a SameAccount error
    pub fn same_account(account: &str) -> Self {
        TransferError::SameAccount {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        TransferError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TransferError::InvalidAmount { amount }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        TransferError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create an InvalidOpeningBalance error
    pub fn invalid_opening_balance(account: &str, amount: Decimal) -> Self {
        TransferError::InvalidOpeningBalance {
            account: account.to_string(),
            amount,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        TransferError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op_type: &str) -> Self {
        TransferError::InvalidOperation {
            op_type: op_type.to_string(),
        }
    }

    /// Create a MissingAmount error
    pub fn missing_amount(op_type: &str, account: &str) -> Self {
        TransferError::MissingAmount {
            op_type: op_type.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a MissingDestination error
    pub fn missing_destination(account: &str) -> Self {
        TransferError::MissingDestination {
            account: account.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::unknown_account(
        TransferError::UnknownAccount { account: "RON".to_string() },
        "Account 'RON' does not exist"
    )]
    #[case::same_account(
        TransferError::SameAccount { account: "John".to_string() },
        "Cannot transfer within the same account 'John'"
    )]
    #[case::insufficient_funds(
        TransferError::InsufficientFunds {
            account: "John".to_string(),
            balance: Decimal::new(124500, 2),
            requested: Decimal::new(1000000, 2),
        },
        "Insufficient funds in account 'John': balance 1245.00, requested 10000.00"
    )]
    #[case::invalid_amount(
        TransferError::InvalidAmount { amount: Decimal::new(-500, 2) },
        "Transfer amount must be positive, got -5.00"
    )]
    #[case::duplicate_account(
        TransferError::DuplicateAccount { account: "John".to_string() },
        "Account 'John' already exists"
    )]
    #[case::invalid_opening_balance(
        TransferError::InvalidOpeningBalance {
            account: "John".to_string(),
            amount: Decimal::new(-100, 2),
        },
        "Opening balance for account 'John' must not be negative, got -1.00"
    )]
    #[case::arithmetic_overflow(
        TransferError::ArithmeticOverflow {
            operation: "credit".to_string(),
            account: "Ron".to_string(),
        },
        "Arithmetic overflow in credit for account 'Ron'"
    )]
    #[case::io_error(
        TransferError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        TransferError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        TransferError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_operation(
        TransferError::InvalidOperation { op_type: "withdraw".to_string() },
        "Invalid operation type 'withdraw'"
    )]
    #[case::missing_amount(
        TransferError::MissingAmount {
            op_type: "transfer".to_string(),
            account: "John".to_string(),
        },
        "transfer operation for account 'John' requires an amount"
    )]
    #[case::missing_destination(
        TransferError::MissingDestination { account: "John".to_string() },
        "Transfer from account 'John' requires a destination account"
    )]
    fn test_error_display(#[case] error: TransferError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::unknown_account(
        TransferError::unknown_account("RON"),
        TransferError::UnknownAccount { account: "RON".to_string() }
    )]
    #[case::same_account(
        TransferError::same_account("John"),
        TransferError::SameAccount { account: "John".to_string() }
    )]
    #[case::insufficient_funds(
        TransferError::insufficient_funds("John", Decimal::new(5000, 2), Decimal::new(10000, 2)),
        TransferError::InsufficientFunds {
            account: "John".to_string(),
            balance: Decimal::new(5000, 2),
            requested: Decimal::new(10000, 2),
        }
    )]
    #[case::duplicate_account(
        TransferError::duplicate_account("John"),
        TransferError::DuplicateAccount { account: "John".to_string() }
    )]
    #[case::arithmetic_overflow(
        TransferError::arithmetic_overflow("debit", "John"),
        TransferError::ArithmeticOverflow {
            operation: "debit".to_string(),
            account: "John".to_string(),
        }
    )]
    fn test_helper_functions(#[case] result: TransferError, #[case] expected: TransferError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: TransferError = io_error.into();
        assert!(matches!(error, TransferError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}

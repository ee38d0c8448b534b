//! CSV format handling for operation records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! Upstream validation lives here: non-positive transfer amounts, negative
//! opening balances, missing destinations and unknown operation types are
//! all rejected before a record ever reaches the engine. The engine still
//! defends the positive-amount precondition on its own.

use crate::types::{Account, OperationRecord, OperationType, TransferError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, account, to, amount.
/// The `to` field is only meaningful for transfers; creates leave it
/// empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub account: String,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation type string into an OperationType enum
/// - Parses the amount string into a Decimal
/// - Validates that creates carry a non-negative opening balance
/// - Validates that transfers carry a destination and a strictly positive
///   amount
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(TransferError) - Error describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, TransferError> {
    let op_type = match csv_record.op_type.to_lowercase().as_str() {
        "create" => OperationType::Create,
        "transfer" => OperationType::Transfer,
        other => return Err(TransferError::invalid_operation(other)),
    };

    if csv_record.account.trim().is_empty() {
        return Err(TransferError::ParseError {
            line: None,
            message: "account field must not be empty".to_string(),
        });
    }
    let account = csv_record.account.trim().to_string();

    // Parse the amount; both operation kinds require one
    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => Decimal::from_str(amount_str)
            .map_err(|_| TransferError::ParseError {
                line: None,
                message: format!("Invalid amount '{}' for account '{}'", amount_str, account),
            })?,
        _ => {
            let op_name = match op_type {
                OperationType::Create => "create",
                OperationType::Transfer => "transfer",
            };
            return Err(TransferError::missing_amount(op_name, &account));
        }
    };

    let destination = match op_type {
        OperationType::Create => {
            if amount < Decimal::ZERO {
                return Err(TransferError::invalid_opening_balance(&account, amount));
            }
            // Any destination on a create is meaningless; ignore it
            None
        }
        OperationType::Transfer => {
            if amount <= Decimal::ZERO {
                return Err(TransferError::invalid_amount(amount));
            }
            match csv_record.to.as_deref().map(str::trim) {
                Some(to) if !to.is_empty() => Some(to.to_string()),
                _ => return Err(TransferError::missing_destination(&account)),
            }
        }
    };

    Ok(OperationRecord {
        op_type,
        account,
        destination,
        amount,
    })
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: account, balance.
/// Accounts are sorted by identifier for deterministic output; balances
/// are rendered with two decimal places.
///
/// # Arguments
///
/// * `accounts` - Slice of account snapshots to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    // Write header
    writer
        .write_record(["account", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort accounts by identifier for deterministic output
    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    // Write each account
    for account in sorted_accounts {
        writer
            .write_record(&[account.id.clone(), format!("{:.2}", account.balance)])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of
//! the ProcessingStrategy trait. It orchestrates operation processing by
//! coordinating between the SyncReader (for CSV input) and TransferEngine
//! (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Account creation and transfers to `TransferEngine`
//! - CSV output to `csv_format::write_accounts_csv`
//!
//! Records are applied strictly in file order, so outcomes are fully
//! deterministic; this is the reference behavior the concurrent strategy
//! is checked against in the end-to-end tests.

use crate::core::notifier::ConsoleNotifier;
use crate::core::store::AccountStore;
use crate::core::TransferEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{OperationRecord, OperationType, TransferError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// Implements the ProcessingStrategy trait using single-threaded,
/// sequential processing. Thread-safe components are still used underneath
/// (the engine is shared-state by construction), but no concurrency is
/// introduced by this strategy.
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

/// Apply a single operation record through the engine
///
/// Shared by the sync pipeline and its tests; transfer dispatching in the
/// async pipeline has its own equivalent in the dispatcher.
fn apply_record(engine: &TransferEngine, record: &OperationRecord) -> Result<(), TransferError> {
    match record.op_type {
        OperationType::Create => engine.create_account(record.account.clone(), record.amount),
        OperationType::Transfer => {
            let destination = record
                .destination
                .as_deref()
                .ok_or_else(|| TransferError::missing_destination(&record.account))?;
            engine.transfer(&record.account, destination, record.amount)
        }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process operations from input file and write results to output
    ///
    /// This method orchestrates the complete synchronous pipeline:
    /// 1. Creates a SyncReader to stream operation records from the CSV file
    /// 2. Creates a TransferEngine over a fresh account store
    /// 3. Applies each record in file order
    /// 4. Writes final account balances using csv_format::write_accounts_csv
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual operation errors are logged to stderr and processing
    /// continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = TransferEngine::new(Arc::new(AccountStore::new()), Arc::new(ConsoleNotifier));

        // Create sync reader for streaming CSV input
        let reader = SyncReader::new(input_path)?;

        // Apply each operation record in file order
        for result in reader {
            match result {
                Ok(record) => {
                    if let Err(e) = apply_record(&engine, &record) {
                        // Log operation failures to stderr
                        eprintln!("Operation processing error: {}", e);
                    }
                }
                Err(e) => {
                    // Log CSV parsing/conversion errors to stderr
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        // Write final account balances to output
        write_accounts_csv(&engine.accounts(), output)?;

        Ok(())
    }
}

//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-worker implementation of
//! the ProcessingStrategy trait. It reads operations in batches and fans
//! each batch's transfers out across concurrent tasks.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── TransferDispatcher (concurrent transfer fan-out)
//!     └── TransferEngine (ordered per-account locking)
//!         └── AccountStore (DashMap of Arc<AccountEntry>)
//! ```
//!
//! # Ordering
//!
//! Batches are read and processed sequentially; within a batch, creates
//! are applied in file order before the batch's transfers are dispatched
//! concurrently, so a transfer can always see accounts created earlier in
//! the file. Transfers within a batch race each other; the engine's
//! identifier-ordered locking makes every interleaving safe, and final
//! balances for workloads without rejections are deterministic by
//! conservation.

use crate::core::dispatcher::TransferDispatcher;
use crate::core::notifier::ConsoleNotifier;
use crate::core::store::AccountStore;
use crate::core::TransferEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how operations are batched and the number of concurrent
/// worker tasks used for transfer dispatch within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Maximum number of transfers dispatched concurrently
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are rejected with a warning on stderr and replaced by
    /// the defaults.
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Implements the ProcessingStrategy trait using multi-worker concurrent
/// transfer dispatch. This is the strategy that actually exercises the
/// engine's deadlock-prevention invariant in production use: many tasks
/// issue transfers for overlapping account pairs at the same time.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process operations from input file and write results to output
    ///
    /// This method implements the complete asynchronous batch pipeline:
    /// 1. Creates the shared engine (store + console notifier)
    /// 2. Creates a TransferDispatcher over the shared engine
    /// 3. Creates a tokio multi-threaded runtime
    /// 4. Reads operations in batches from CSV using AsyncReader
    /// 5. For each batch: applies creates in file order, then dispatches
    ///    the batch's transfers across concurrent worker tasks
    /// 6. Writes final account balances using csv_format::write_accounts_csv
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are
    /// returned immediately. Individual operation errors are logged to
    /// stderr and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        // Create tokio runtime for async execution
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        // Execute async processing within the runtime
        runtime.block_on(async {
            let engine = Arc::new(TransferEngine::new(
                Arc::new(AccountStore::new()),
                Arc::new(ConsoleNotifier),
            ));
            let dispatcher = TransferDispatcher::new(Arc::clone(&engine));

            // Open the CSV file
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            // Create async CSV reader
            let mut reader = AsyncReader::new(compat_file);

            // Process batches sequentially; concurrency lives inside the
            // transfer dispatch of each batch.
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;

                // If batch is empty, we've reached end of file
                if batch.is_empty() {
                    break;
                }

                // Creates first, in file order, so this batch's transfers
                // can rely on them.
                let (creates, transfers) = TransferDispatcher::partition(batch);
                for record in &creates {
                    if let Err(e) = engine.create_account(record.account.clone(), record.amount) {
                        eprintln!("Operation processing error: {}", e);
                    }
                }

                let results = dispatcher.dispatch(transfers, self.config.max_concurrent).await;
                for dispatched in results {
                    if let Err(e) = dispatched.result {
                        eprintln!("Operation processing error: {}", e);
                    }
                }
            }

            // Write final account balances to output
            write_accounts_csv(&engine.accounts(), output)?;

            Ok(())
        })
    }
}

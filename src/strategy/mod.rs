//! Processing strategy module for operation processing
//!
//! This module defines the Strategy pattern for complete operation
//! processing pipelines, encompassing CSV parsing, account creation and
//! transfer execution. This allows different processing implementations
//! (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete operation processing pipelines
///
/// Each strategy must be able to read operations from a CSV file, apply
/// them through the transfer engine, and write the final account balances
/// to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from input file and write final balances to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing operation records
    /// * `output` - Mutable reference to a writer for outputting account balances
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed successfully (or with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Individual operation failures (unknown account, insufficient funds,
    /// malformed records) are logged to stderr and do not cause this method
    /// to return an error; processing continues with the next record.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory selecting the appropriate processing strategy implementation at
/// runtime based on the provided strategy type and optional configuration.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

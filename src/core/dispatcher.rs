//! Concurrent dispatch of transfer batches
//!
//! This module provides the `TransferDispatcher`, which fans a batch of
//! transfer operations out across multiple tokio tasks. It is the
//! production-shaped concurrent caller of the engine: many workers issue
//! transfers for arbitrary, possibly overlapping, account pairs at the
//! same time, relying entirely on the engine's ordered lock acquisition
//! for correctness.
//!
//! # Design
//!
//! A batch is split into `max_workers` slices; each worker task applies
//! its slice sequentially through the shared engine. Creates are not
//! dispatched here - the strategy applies them in file order before
//! handing the batch's transfers over, so a transfer can rely on every
//! account created earlier in the file.
//!
//! # Ordering
//!
//! Transfers within a batch run concurrently, so when several transfers
//! contend for the same balance, which of them is rejected with
//! `InsufficientFunds` is not deterministic. Conservation and
//! non-negativity hold regardless.

use crate::core::engine::TransferEngine;
use crate::types::{OperationRecord, OperationType, TransferError};
use std::sync::Arc;

/// Result of dispatching a single transfer
///
/// Contains the original operation record and the outcome of applying it.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// The transfer record that was applied
    pub record: OperationRecord,

    /// The outcome (success or error)
    pub result: Result<(), TransferError>,
}

/// Fans transfer batches out across concurrent worker tasks
///
/// Cloneable and safe to share across async tasks; all state is the
/// Arc-wrapped engine.
#[derive(Clone)]
pub struct TransferDispatcher {
    /// Shared thread-safe transfer engine
    engine: Arc<TransferEngine>,
}

impl TransferDispatcher {
    /// Create a new TransferDispatcher over the shared engine
    pub fn new(engine: Arc<TransferEngine>) -> Self {
        TransferDispatcher { engine }
    }

    /// Split a batch into operation kinds, preserving file order
    ///
    /// Returns `(creates, transfers)`. Creates must be applied before the
    /// transfers of the same batch are dispatched.
    pub fn partition(
        batch: Vec<OperationRecord>,
    ) -> (Vec<OperationRecord>, Vec<OperationRecord>) {
        batch
            .into_iter()
            .partition(|record| record.op_type == OperationType::Create)
    }

    /// Apply a batch of transfers concurrently
    ///
    /// Spawns up to `max_workers` tasks, each applying a contiguous slice
    /// of the batch sequentially. Returns one result per input record;
    /// result order follows worker completion, not input order.
    ///
    /// # Arguments
    ///
    /// * `transfers` - Transfer records to apply
    /// * `max_workers` - Upper bound on concurrent worker tasks (values
    ///   below 1 are treated as 1)
    pub async fn dispatch(
        &self,
        transfers: Vec<OperationRecord>,
        max_workers: usize,
    ) -> Vec<DispatchResult> {
        if transfers.is_empty() {
            return Vec::new();
        }

        let workers = max_workers.max(1).min(transfers.len());
        let chunk_size = transfers.len().div_ceil(workers);

        let mut handles = Vec::with_capacity(workers);
        let mut transfers = transfers;
        while !transfers.is_empty() {
            let chunk: Vec<OperationRecord> =
                transfers.drain(..chunk_size.min(transfers.len())).collect();
            let engine = Arc::clone(&self.engine);

            handles.push(tokio::spawn(async move {
                chunk
                    .into_iter()
                    .map(|record| {
                        let result = Self::apply(&engine, &record);
                        DispatchResult { record, result }
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(mut chunk_results) => results.append(&mut chunk_results),
                Err(e) => eprintln!("Transfer worker task failed: {}", e),
            }
        }
        results
    }

    /// Apply a single transfer record through the engine
    fn apply(engine: &TransferEngine, record: &OperationRecord) -> Result<(), TransferError> {
        let destination = record
            .destination
            .as_deref()
            .ok_or_else(|| TransferError::missing_destination(&record.account))?;
        engine.transfer(&record.account, destination, record.amount)
    }
}

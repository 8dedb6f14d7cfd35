use futures::future::join_all;
use kvkit_core::batching::plan_batches;
use kvkit_core::contract::{
    BatchOutcome, BatchPlan, DispatchSummary, ValidationError, WriteKind,
};
use tracing::{debug, error, info};

use crate::adapters::document_store::{DocumentStore, Item};

/// One or more batches failed. Sibling batches are never cancelled, so
/// every outcome is retained here, failed and succeeded alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub outcomes: Vec<BatchOutcome>,
}

impl DispatchError {
    pub fn failed_batches(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let failures: Vec<String> = self
            .failed_batches()
            .map(|outcome| {
                format!(
                    "batch {}: {}",
                    outcome.batch_index,
                    outcome.error.as_deref().unwrap_or("unknown error")
                )
            })
            .collect();
        write!(
            f,
            "{} of {} batches failed ({})",
            failures.len(),
            self.outcomes.len(),
            failures.join("; ")
        )
    }
}

impl std::error::Error for DispatchError {}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchWriteError {
    Validation(ValidationError),
    Dispatch(DispatchError),
}

impl std::fmt::Display for BatchWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(error) => error.fmt(f),
            Self::Dispatch(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for BatchWriteError {}

impl From<ValidationError> for BatchWriteError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<DispatchError> for BatchWriteError {
    fn from(error: DispatchError) -> Self {
        Self::Dispatch(error)
    }
}

/// Maps `items` to write operations of one kind, partitions them into
/// ≤25-operation batches, and dispatches all batches concurrently,
/// returning once every batch has completed.
pub async fn batch_write(
    store: &dyn DocumentStore,
    table: &str,
    kind: WriteKind,
    items: Vec<Item>,
) -> Result<DispatchSummary, BatchWriteError> {
    let plan = plan_batches(table, kind, items)?;
    Ok(dispatch_plan(store, &plan).await?)
}

/// Dispatches every batch of the plan as an independent store call, all
/// issued before any is awaited, then joins on the full set. Completion
/// order between batches is unspecified and there is no atomicity across
/// them; a failed batch does not abort its in-flight siblings. No retry
/// is attempted.
pub async fn dispatch_plan(
    store: &dyn DocumentStore,
    plan: &BatchPlan<Item>,
) -> Result<DispatchSummary, DispatchError> {
    let batch_count = plan.batch_count();
    if plan.is_empty() {
        info!(table = %plan.table, "no write operations to dispatch");
        return Ok(DispatchSummary {
            table: plan.table.clone(),
            batches_dispatched: 0,
            operations_submitted: 0,
            outcomes: Vec::new(),
        });
    }

    let batch_calls = plan
        .batches
        .iter()
        .enumerate()
        .map(|(batch_index, operations)| {
            let table = plan.table.as_str();
            async move {
                debug!(
                    table,
                    batch_index,
                    batch_count,
                    payload = ?operations,
                    "dispatching batch"
                );
                let result = store.write_batch(table, operations).await;
                (batch_index, operations.len(), result)
            }
        });

    let results = join_all(batch_calls).await;

    let mut outcomes = Vec::with_capacity(batch_count);
    for (batch_index, operation_count, result) in results {
        match &result {
            Ok(()) => info!(
                table = %plan.table,
                batch_index,
                batch_count,
                operation_count,
                "batch write acknowledged"
            ),
            Err(batch_error) => error!(
                table = %plan.table,
                batch_index,
                batch_count,
                operation_count,
                error = %batch_error,
                "batch write failed"
            ),
        }
        outcomes.push(BatchOutcome {
            batch_index,
            operation_count,
            error: result.err().map(|batch_error| batch_error.to_string()),
        });
    }

    if outcomes.iter().any(|outcome| !outcome.succeeded()) {
        return Err(DispatchError { outcomes });
    }

    Ok(DispatchSummary {
        table: plan.table.clone(),
        batches_dispatched: batch_count,
        operations_submitted: outcomes.iter().map(|outcome| outcome.operation_count).sum(),
        outcomes,
    })
}

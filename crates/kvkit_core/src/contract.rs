use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound the external store accepts for one batch-write call.
pub const MAX_BATCH_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    Put,
    Delete,
}

/// A single write against the external store: insert-or-replace a full
/// record, or delete by key. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteOperation<T> {
    Put { record: T },
    Delete { key: T },
}

impl<T> WriteOperation<T> {
    pub fn kind(&self) -> WriteKind {
        match self {
            Self::Put { .. } => WriteKind::Put,
            Self::Delete { .. } => WriteKind::Delete,
        }
    }
}

/// Ordered partition of write operations into groups of at most
/// [`MAX_BATCH_SIZE`], all directed at one table.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan<T> {
    pub table: String,
    pub batches: Vec<Vec<WriteOperation<T>>>,
}

impl<T> BatchPlan<T> {
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn total_operations(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Completion record for one dispatched batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub batch_index: usize,
    pub operation_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Caller-facing summary after all batches have completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub table: String,
    pub batches_dispatched: usize,
    pub operations_submitted: usize,
    pub outcomes: Vec<BatchOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Tagged error surface for the store boundary. Callers match on the
/// kind instead of probing the shape of an opaque error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store service error: {0}")]
    Service(String),
}

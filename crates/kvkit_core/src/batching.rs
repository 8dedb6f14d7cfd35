use crate::contract::{BatchPlan, ValidationError, WriteKind, WriteOperation, MAX_BATCH_SIZE};

/// Maps `items` to write operations of the given kind and partitions them
/// into contiguous batches of at most [`MAX_BATCH_SIZE`], preserving input
/// order. The last batch may be smaller; an empty input yields an empty
/// plan.
pub fn plan_batches<T>(
    table: &str,
    kind: WriteKind,
    items: Vec<T>,
) -> Result<BatchPlan<T>, ValidationError> {
    let table = table.trim();
    if table.is_empty() {
        return Err(ValidationError::new("table name cannot be empty"));
    }

    let input_len = items.len();
    let mut batches = Vec::with_capacity(input_len.div_ceil(MAX_BATCH_SIZE));
    let mut current = Vec::with_capacity(MAX_BATCH_SIZE.min(input_len));

    for item in items {
        current.push(match kind {
            WriteKind::Put => WriteOperation::Put { record: item },
            WriteKind::Delete => WriteOperation::Delete { key: item },
        });
        if current.len() == MAX_BATCH_SIZE {
            batches.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(MAX_BATCH_SIZE),
            ));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    validate_batches(input_len, kind, &batches)?;
    Ok(BatchPlan {
        table: table.to_string(),
        batches,
    })
}

fn validate_batches<T>(
    input_len: usize,
    kind: WriteKind,
    batches: &[Vec<WriteOperation<T>>],
) -> Result<(), ValidationError> {
    let total: usize = batches.iter().map(Vec::len).sum();
    if total != input_len {
        return Err(ValidationError::new(
            "Batches do not cover the full input list",
        ));
    }

    for (index, batch) in batches.iter().enumerate() {
        if batch.is_empty() {
            return Err(ValidationError::new("Batches must not be empty"));
        }
        if batch.len() > MAX_BATCH_SIZE {
            return Err(ValidationError::new(format!(
                "Batch {index} exceeds MAX_BATCH_SIZE={MAX_BATCH_SIZE}"
            )));
        }
        if index + 1 < batches.len() && batch.len() != MAX_BATCH_SIZE {
            return Err(ValidationError::new(
                "Only the final batch may be smaller than MAX_BATCH_SIZE",
            ));
        }
        if batch.iter().any(|operation| operation.kind() != kind) {
            return Err(ValidationError::new(
                "All operations in a plan must share one kind",
            ));
        }
    }

    Ok(())
}

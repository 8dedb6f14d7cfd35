use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use kvkit_core::contract::{StoreError, WriteOperation};

use crate::adapters::document_store::{DocumentStore, Item};

pub fn record(index: usize) -> Item {
    HashMap::from([("id".to_string(), AttributeValue::N(index.to_string()))])
}

/// Capturing [`DocumentStore`] fake. Batch writes are recorded in call
/// order; a batch fails if any of its records carries a `poison`
/// attribute. Only the batch-write path is implemented.
pub struct RecordingStore {
    batches: Mutex<Vec<Vec<WriteOperation<Item>>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatched_batches(&self) -> Vec<Vec<WriteOperation<Item>>> {
        self.batches.lock().expect("poisoned mutex").clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, _table: &str, _key: Item) -> Result<Option<Item>, StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn put(&self, _table: &str, _record: Item) -> Result<(), StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn put_conditional(
        &self,
        _table: &str,
        _record: Item,
        _condition_expression: &str,
    ) -> Result<(), StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn update(
        &self,
        _table: &str,
        _key: Item,
        _update_expression: &str,
        _expression_values: Item,
    ) -> Result<(), StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn delete(&self, _table: &str, _key: Item) -> Result<(), StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn query(
        &self,
        _table: &str,
        _key_condition_expression: &str,
        _expression_values: Item,
    ) -> Result<Vec<Item>, StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn scan(&self, _table: &str) -> Result<Vec<Item>, StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn execute_statement(
        &self,
        _statement: &str,
        _parameters: Vec<AttributeValue>,
    ) -> Result<Vec<Item>, StoreError> {
        unimplemented!("not exercised by batch tests")
    }

    async fn write_batch(
        &self,
        _table: &str,
        operations: &[WriteOperation<Item>],
    ) -> Result<(), StoreError> {
        self.batches
            .lock()
            .expect("poisoned mutex")
            .push(operations.to_vec());

        let poisoned = operations.iter().any(|operation| {
            let WriteOperation::Put { record } = operation else {
                return false;
            };
            record.contains_key("poison")
        });
        if poisoned {
            return Err(StoreError::Service("simulated service outage".to_string()));
        }
        Ok(())
    }
}

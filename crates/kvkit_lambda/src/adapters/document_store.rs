use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, PutRequest, WriteRequest};
use kvkit_core::contract::{StoreError, WriteOperation, MAX_BATCH_SIZE};

/// One record or key as the external store represents it.
pub type Item = HashMap<String, AttributeValue>;

/// Thin pass-through boundary over the managed document store. The handle
/// behind an implementation is expected to be shared and safe for
/// concurrent use; no retry or sub-item status inspection happens here.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError>;

    async fn put(&self, table: &str, record: Item) -> Result<(), StoreError>;

    async fn put_conditional(
        &self,
        table: &str,
        record: Item,
        condition_expression: &str,
    ) -> Result<(), StoreError>;

    async fn update(
        &self,
        table: &str,
        key: Item,
        update_expression: &str,
        expression_values: Item,
    ) -> Result<(), StoreError>;

    async fn delete(&self, table: &str, key: Item) -> Result<(), StoreError>;

    async fn query(
        &self,
        table: &str,
        key_condition_expression: &str,
        expression_values: Item,
    ) -> Result<Vec<Item>, StoreError>;

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;

    async fn execute_statement(
        &self,
        statement: &str,
        parameters: Vec<AttributeValue>,
    ) -> Result<Vec<Item>, StoreError>;

    /// Submits up to [`MAX_BATCH_SIZE`] operations as one network call.
    async fn write_batch(
        &self,
        table: &str,
        operations: &[WriteOperation<Item>],
    ) -> Result<(), StoreError>;
}

/// DynamoDB-backed [`DocumentStore`] wrapping one shared SDK client.
/// The client multiplexes its own connections, so a single clone-cheap
/// handle is injected at construction instead of being built per call.
#[derive(Debug, Clone)]
pub struct DynamoDocumentStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDocumentStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentStore for DynamoDocumentStore {
    async fn get(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|error| StoreError::Service(format!("failed to get item: {error}")))?;
        Ok(output.item)
    }

    async fn put(&self, table: &str, record: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StoreError::Service(format!("failed to put item: {error}")))
    }

    async fn put_conditional(
        &self,
        table: &str,
        record: Item,
        condition_expression: &str,
    ) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record))
            .condition_expression(condition_expression)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                StoreError::Service(format!("failed to put item conditionally: {error}"))
            })
    }

    async fn update(
        &self,
        table: &str,
        key: Item,
        update_expression: &str,
        expression_values: Item,
    ) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(table)
            .set_key(Some(key))
            .update_expression(update_expression)
            .set_expression_attribute_values(Some(expression_values))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StoreError::Service(format!("failed to update item: {error}")))
    }

    async fn delete(&self, table: &str, key: Item) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StoreError::Service(format!("failed to delete item: {error}")))
    }

    async fn query(
        &self,
        table: &str,
        key_condition_expression: &str,
        expression_values: Item,
    ) -> Result<Vec<Item>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(table)
            .key_condition_expression(key_condition_expression)
            .set_expression_attribute_values(Some(expression_values))
            .send()
            .await
            .map_err(|error| StoreError::Service(format!("failed to query table: {error}")))?;
        Ok(output.items.unwrap_or_default())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(table)
            .send()
            .await
            .map_err(|error| StoreError::Service(format!("failed to scan table: {error}")))?;
        Ok(output.items.unwrap_or_default())
    }

    async fn execute_statement(
        &self,
        statement: &str,
        parameters: Vec<AttributeValue>,
    ) -> Result<Vec<Item>, StoreError> {
        let mut request = self.client.execute_statement().statement(statement);
        if !parameters.is_empty() {
            request = request.set_parameters(Some(parameters));
        }
        let output = request
            .send()
            .await
            .map_err(|error| StoreError::Service(format!("failed to execute statement: {error}")))?;
        Ok(output.items.unwrap_or_default())
    }

    async fn write_batch(
        &self,
        table: &str,
        operations: &[WriteOperation<Item>],
    ) -> Result<(), StoreError> {
        if operations.is_empty() {
            return Ok(());
        }
        if operations.len() > MAX_BATCH_SIZE {
            return Err(StoreError::Validation(format!(
                "batch of {} operations exceeds MAX_BATCH_SIZE={MAX_BATCH_SIZE}",
                operations.len()
            )));
        }

        let mut requests = Vec::with_capacity(operations.len());
        for operation in operations {
            requests.push(to_write_request(operation)?);
        }

        self.client
            .batch_write_item()
            .request_items(table, requests)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StoreError::Service(format!("failed to batch-write items: {error}")))
    }
}

fn to_write_request(operation: &WriteOperation<Item>) -> Result<WriteRequest, StoreError> {
    let request = match operation {
        WriteOperation::Put { record } => {
            let put = PutRequest::builder()
                .set_item(Some(record.clone()))
                .build()
                .map_err(|error| {
                    StoreError::Validation(format!("invalid put request: {error}"))
                })?;
            WriteRequest::builder().put_request(put).build()
        }
        WriteOperation::Delete { key } => {
            let delete = DeleteRequest::builder()
                .set_key(Some(key.clone()))
                .build()
                .map_err(|error| {
                    StoreError::Validation(format!("invalid delete request: {error}"))
                })?;
            WriteRequest::builder().delete_request(delete).build()
        }
    };
    Ok(request)
}

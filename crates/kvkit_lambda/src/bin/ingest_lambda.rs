use kvkit_core::response::ApiGatewayResponse;
use kvkit_lambda::adapters::document_store::DynamoDocumentStore;
use kvkit_lambda::handlers::ingest::handle_ingest_event;
use kvkit_lambda::logging::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    // One config load and one store handle per process; every event
    // reuses them, and the SDK client multiplexes its own connections.
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoDocumentStore::new(aws_sdk_dynamodb::Client::new(&config));
    let default_table = std::env::var("TABLE_NAME").ok();

    let store = &store;
    let default_table = default_table.as_deref();
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(
            handle_ingest_event(event.payload, default_table, store).await,
        )
    }))
    .await
}

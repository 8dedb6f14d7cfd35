use chrono::Utc;
use kvkit_core::batching::plan_batches;
use kvkit_core::contract::WriteKind;
use kvkit_core::response::{
    error_response, normalize_apigw_event, success_response, validation_error_response,
    ApiGatewayResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::adapters::conversions::json_map_to_item;
use crate::adapters::dispatch::dispatch_plan;
use crate::adapters::document_store::{DocumentStore, Item};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestRequest {
    #[serde(default)]
    pub table: Option<String>,
    pub kind: WriteKind,
    pub items: Vec<Map<String, Value>>,
}

/// Accepts a batched write request, plans it into ≤25-operation groups,
/// and dispatches all groups concurrently against the injected store.
/// Answers 200 with a dispatch summary, 400 on malformed input, and 502
/// when any group fails.
pub async fn handle_ingest_event(
    event: Value,
    default_table: Option<&str>,
    store: &dyn DocumentStore,
) -> ApiGatewayResponse {
    let received_at = Utc::now();

    let payload = match normalize_apigw_event(event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let request = match serde_json::from_value::<IngestRequest>(payload) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&format!("Malformed request: {error}")),
    };

    let table = match resolve_table(request.table.as_deref(), default_table) {
        Some(value) => value.to_string(),
        None => {
            return validation_error_response(
                "table must be provided in the request or via TABLE_NAME",
            );
        }
    };

    let items: Vec<Item> = request.items.iter().map(json_map_to_item).collect();
    let plan = match plan_batches(&table, request.kind, items) {
        Ok(value) => value,
        Err(error) => return validation_error_response(error.message()),
    };

    info!(
        table = %plan.table,
        operations = plan.total_operations(),
        batches = plan.batch_count(),
        received_at = %received_at.to_rfc3339(),
        "dispatching ingest request"
    );

    match dispatch_plan(store, &plan).await {
        Ok(summary) => success_response(200, summary),
        Err(error) => error_response(
            502,
            json!({
                "error": "dispatch_failed",
                "message": error.to_string(),
                "outcomes": error.outcomes,
            }),
        ),
    }
}

fn resolve_table<'a>(requested: Option<&'a str>, default_table: Option<&'a str>) -> Option<&'a str> {
    [requested, default_table]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
}

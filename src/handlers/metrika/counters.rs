use serde_json::{json, Value};

use super::counter_path;
use crate::client::{ApiError, YandexClient};
use crate::protocol::metrika::{CounterParams, CreateCounterParams, DeleteCounterParams, GetCountersParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render;

const COUNTERS_PATH: &str = "/management/v1/counters";

pub async fn list(params: GetCountersParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut query = Vec::new();
    if let Some(favorite) = params.favorite {
        query.push(("favorite", favorite.to_string()));
    }
    if let Some(search) = params.search_string.filter(|s| !s.is_empty()) {
        query.push(("search_string", search));
    }

    let result = client.metrika_get(COUNTERS_PATH, &query).await?;
    let counters = result
        .get("counters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    Ok(match params.response_format {
        ResponseFormat::Json => {
            let total = result.get("rows").cloned().unwrap_or_else(|| json!(counters.len()));
            ToolResult::json(&json!({ "counters": counters, "total": total }))
        }
        ResponseFormat::Markdown => ToolResult::text(render::metrika::counters(counters)),
    })
}

pub async fn get(params: CounterParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let result = client.metrika_get(&counter_path(params.counter_id), &[]).await?;
    let counter = result.get("counter").cloned().unwrap_or_else(|| json!({}));

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&counter),
        ResponseFormat::Markdown => ToolResult::text(render::metrika::counter_detail(&counter)),
    })
}

pub async fn create(params: CreateCounterParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let body = json!({
        "counter": {
            "name": params.name,
            "site2": { "site": params.site }
        }
    });

    let result = client.metrika_post(COUNTERS_PATH, &body).await?;
    let counter = result.get("counter").cloned().unwrap_or_else(|| json!({}));
    Ok(ToolResult::text(render::metrika::counter_created(&counter)))
}

pub async fn delete(params: DeleteCounterParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    client.metrika_delete(&counter_path(params.counter_id)).await?;
    Ok(ToolResult::text(format!(
        "Counter {} deleted successfully.",
        params.counter_id
    )))
}

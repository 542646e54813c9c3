use serde_json::{json, Value};

use super::counter_path;
use crate::client::{ApiError, YandexClient};
use crate::protocol::metrika::{CounterParams, CreateGoalParams, DeleteGoalParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render;

pub async fn list(params: CounterParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let path = format!("{}/goals", counter_path(params.counter_id));
    let result = client.metrika_get(&path, &[]).await?;
    let goals = result
        .get("goals")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&json!({ "goals": goals, "total": goals.len() })),
        ResponseFormat::Markdown => ToolResult::text(render::metrika::goals(params.counter_id, goals)),
    })
}

pub async fn create(params: CreateGoalParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let path = format!("{}/goals", counter_path(params.counter_id));
    let body = json!({
        "goal": {
            "name": params.name,
            "type": params.goal_type,
            "conditions": params.conditions
        }
    });

    let result = client.metrika_post(&path, &body).await?;
    let goal = result.get("goal").cloned().unwrap_or_else(|| json!({}));
    Ok(ToolResult::text(render::metrika::goal_created(&goal)))
}

pub async fn delete(params: DeleteGoalParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let path = format!("{}/goal/{}", counter_path(params.counter_id), params.goal_id);
    client.metrika_delete(&path).await?;
    Ok(ToolResult::text(format!(
        "Goal {} deleted from counter {}.",
        params.goal_id, params.counter_id
    )))
}

use crate::client::{ApiError, YandexClient};
use crate::protocol::metrika::{MetrikaByTimeParams, MetrikaReportParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render;

type Query = Vec<(&'static str, String)>;

/// Query parameters shared by both report endpoints.
fn base_query(
    counter_id: i64,
    metrics: &[String],
    dimensions: Option<&[String]>,
    date1: Option<&str>,
    date2: Option<&str>,
) -> Query {
    let mut query = vec![("id", counter_id.to_string()), ("metrics", metrics.join(","))];
    if let Some(dimensions) = dimensions.filter(|d| !d.is_empty()) {
        query.push(("dimensions", dimensions.join(",")));
    }
    if let Some(date1) = date1.filter(|d| !d.is_empty()) {
        query.push(("date1", date1.to_string()));
    }
    if let Some(date2) = date2.filter(|d| !d.is_empty()) {
        query.push(("date2", date2.to_string()));
    }
    query
}

pub fn report_query(params: &MetrikaReportParams) -> Query {
    let mut query = base_query(
        params.counter_id,
        &params.metrics,
        params.dimensions.as_deref(),
        params.date1.as_deref(),
        params.date2.as_deref(),
    );
    query.push(("limit", params.limit.to_string()));
    if let Some(filters) = params.filters.as_deref().filter(|f| !f.is_empty()) {
        query.push(("filters", filters.to_string()));
    }
    if let Some(sort) = params.sort.as_deref().filter(|s| !s.is_empty()) {
        query.push(("sort", sort.to_string()));
    }
    query
}

pub fn by_time_query(params: &MetrikaByTimeParams) -> Query {
    let mut query = base_query(
        params.counter_id,
        &params.metrics,
        params.dimensions.as_deref(),
        params.date1.as_deref(),
        params.date2.as_deref(),
    );
    query.push(("group", params.group.as_str().to_string()));
    query
}

pub async fn get(params: MetrikaReportParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let result = client.metrika_get("/stat/v1/data", &report_query(&params)).await?;

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&result),
        ResponseFormat::Markdown => ToolResult::text(render::metrika::report(&result)),
    })
}

pub async fn by_time(params: MetrikaByTimeParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let result = client
        .metrika_get("/stat/v1/data/bytime", &by_time_query(&params))
        .await?;

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&result),
        ResponseFormat::Markdown => {
            ToolResult::text(render::metrika::report_by_time(&result, params.group.as_str()))
        }
    })
}

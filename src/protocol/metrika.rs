//! Arguments of the Yandex Metrika tools.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Value};

use super::fields;
use super::{ResponseFormat, ToolParams};

string_enum! {
    /// Time grouping for Metrika reports.
    TimeGroup {
        Day => "day",
        Week => "week",
        Month => "month",
        Quarter => "quarter",
        Year => "year",
        Hour => "hour",
        Minute => "minute",
    }
}

impl Default for TimeGroup {
    fn default() -> Self {
        Self::Day
    }
}

fn default_report_metrics() -> Vec<String> {
    vec![
        "ym:s:visits".to_string(),
        "ym:s:users".to_string(),
        "ym:s:bounceRate".to_string(),
    ]
}

fn default_time_metrics() -> Vec<String> {
    vec!["ym:s:visits".to_string()]
}

fn default_report_limit() -> u32 {
    100
}

/// Parameters for `metrika_get_counters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetCountersParams {
    pub favorite: Option<bool>,
    pub search_string: Option<String>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for GetCountersParams {
    fn input_schema() -> Value {
        fields::object(
            &[],
            json!({
                "favorite": fields::boolean("Filter by favorite status", None),
                "search_string": fields::string("Search string to filter counters by name or site"),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for the single-counter reads (`metrika_get_counter`,
/// `metrika_get_goals`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterParams {
    pub counter_id: i64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for CounterParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id"],
            json!({
                "counter_id": fields::integer("Metrika counter ID"),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for `metrika_delete_counter`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteCounterParams {
    pub counter_id: i64,
}

impl ToolParams for DeleteCounterParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id"],
            json!({ "counter_id": fields::integer("Metrika counter ID to delete") }),
        )
    }
}

/// Parameters for `metrika_create_counter`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCounterParams {
    pub name: String,
    pub site: String,
}

impl ToolParams for CreateCounterParams {
    fn input_schema() -> Value {
        fields::object(
            &["name", "site"],
            json!({
                "name": fields::bounded_string("Counter name", Some(1), 255),
                "site": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Website URL"
                }
            }),
        )
    }
}

/// Parameters for `metrika_create_goal`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGoalParams {
    pub counter_id: i64,
    pub name: String,
    pub goal_type: String,
    pub conditions: Vec<BTreeMap<String, String>>,
}

impl ToolParams for CreateGoalParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id", "name", "goal_type", "conditions"],
            json!({
                "counter_id": fields::integer("Metrika counter ID"),
                "name": fields::bounded_string("Goal name", Some(1), 255),
                "goal_type": fields::string("Goal type: url, action, phone, email, messenger, etc."),
                "conditions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": { "type": "string" }
                    },
                    "description": "Goal conditions, e.g., [{'type': 'exact', 'url': '/thank-you'}]"
                }
            }),
        )
    }
}

/// Parameters for `metrika_delete_goal`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteGoalParams {
    pub counter_id: i64,
    pub goal_id: i64,
}

impl ToolParams for DeleteGoalParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id", "goal_id"],
            json!({
                "counter_id": fields::integer("Metrika counter ID"),
                "goal_id": fields::integer("Goal ID to delete")
            }),
        )
    }
}

/// Parameters for `metrika_get_report`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetrikaReportParams {
    pub counter_id: i64,
    #[serde(default = "default_report_metrics")]
    pub metrics: Vec<String>,
    pub dimensions: Option<Vec<String>>,
    pub date1: Option<String>,
    pub date2: Option<String>,
    pub filters: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_report_limit")]
    pub limit: u32,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for MetrikaReportParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id"],
            json!({
                "counter_id": fields::integer("Metrika counter ID"),
                "metrics": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "default": ["ym:s:visits", "ym:s:users", "ym:s:bounceRate"],
                    "description": "Metrics to retrieve (e.g., ym:s:visits, ym:s:users, ym:s:pageviews)"
                },
                "dimensions": fields::string_list(
                    "Dimensions for grouping (e.g., ym:s:date, ym:s:trafficSource)"
                ),
                "date1": fields::date("Start date (YYYY-MM-DD), defaults to 7 days ago"),
                "date2": fields::date("End date (YYYY-MM-DD), defaults to today"),
                "filters": fields::string("Filter expression (e.g., ym:s:trafficSource=='organic')"),
                "sort": fields::string("Sort field with optional '-' prefix for descending"),
                "limit": fields::limit(100_000, "Maximum rows to return"),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for `metrika_get_report_by_time`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetrikaByTimeParams {
    pub counter_id: i64,
    #[serde(default = "default_time_metrics")]
    pub metrics: Vec<String>,
    pub dimensions: Option<Vec<String>>,
    pub date1: Option<String>,
    pub date2: Option<String>,
    #[serde(default)]
    pub group: TimeGroup,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for MetrikaByTimeParams {
    fn input_schema() -> Value {
        fields::object(
            &["counter_id"],
            json!({
                "counter_id": fields::integer("Metrika counter ID"),
                "metrics": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "default": ["ym:s:visits"],
                    "description": "Metrics to retrieve"
                },
                "dimensions": fields::string_list("Dimensions for grouping"),
                "date1": fields::date("Start date (YYYY-MM-DD)"),
                "date2": fields::date("End date (YYYY-MM-DD)"),
                "group": fields::string_enum(
                    TimeGroup::VALUES,
                    Some("day"),
                    "Time grouping: day, week, month, quarter, year, hour, minute"
                ),
                "response_format": fields::response_format()
            }),
        )
    }
}

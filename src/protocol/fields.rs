//! Reusable JSON Schema fragments for tool input schemas.

use serde_json::{json, Map, Value};

use super::ResponseFormat;
use crate::render::MAX_MONEY_UNITS;

pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Closed object schema. Unknown properties are rejected.
pub fn object(required: &[&str], properties: Value) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema.insert("properties".into(), properties);
    schema.insert("additionalProperties".into(), json!(false));
    Value::Object(schema)
}

pub fn integer(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

/// Positive amount in currency units, small enough to fit in micros.
pub fn money(description: &str) -> Value {
    json!({
        "type": "number",
        "exclusiveMinimum": 0,
        "maximum": MAX_MONEY_UNITS,
        "description": description
    })
}

/// [`money`] that also accepts `null`, for members of nested objects where
/// `null` means "not given".
pub fn optional_money(description: &str) -> Value {
    let mut schema = money(description);
    schema["type"] = json!(["number", "null"]);
    schema
}

pub fn boolean(description: &str, default: Option<bool>) -> Value {
    let mut schema = json!({ "type": "boolean", "description": description });
    if let Some(default) = default {
        schema["default"] = json!(default);
    }
    schema
}

pub fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// String with length bounds (in characters).
pub fn bounded_string(description: &str, min: Option<u64>, max: u64) -> Value {
    let mut schema = json!({ "type": "string", "maxLength": max, "description": description });
    if let Some(min) = min {
        schema["minLength"] = json!(min);
    }
    schema
}

pub fn date(description: &str) -> Value {
    json!({ "type": "string", "pattern": DATE_PATTERN, "description": description })
}

pub fn id_list(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "integer" }, "description": description })
}

/// Non-empty ID list with an upper bound on its size.
pub fn bounded_id_list(description: &str, max: u64) -> Value {
    json!({
        "type": "array",
        "items": { "type": "integer" },
        "minItems": 1,
        "maxItems": max,
        "description": description
    })
}

pub fn string_list(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

pub fn enum_list(values: &[&str], description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string", "enum": values },
        "description": description
    })
}

pub fn string_enum(values: &[&str], default: Option<&str>, description: &str) -> Value {
    let mut schema = json!({ "type": "string", "enum": values, "description": description });
    if let Some(default) = default {
        schema["default"] = json!(default);
    }
    schema
}

pub fn response_format() -> Value {
    string_enum(
        ResponseFormat::VALUES,
        Some("markdown"),
        "Output format: 'markdown' or 'json'",
    )
}

pub fn limit(max: u64, description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": max,
        "default": 100,
        "description": description
    })
}

pub fn offset() -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "default": 0,
        "description": "Offset for pagination"
    })
}

use jsonschema::validator_for;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
///
/// Every violation is reported, in the order the validator finds them.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    let violations: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::Invalid(violations))
    }
}

/// Same as [`validate`] for schema and instance given as JSON text.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;
    validate(&schema_json, &instance_json)
}

/// Prepare raw tool arguments for validation.
///
/// Absent arguments become `{}`, every string is trimmed, and top-level
/// `null` members are dropped so they read as "not given".
pub fn normalize_arguments(arguments: Option<&Value>) -> Value {
    match arguments {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(Value::Object(members)) => Value::Object(
            members
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), trim_strings(v)))
                .collect(),
        ),
        Some(other) => trim_strings(other),
    }
}

fn trim_strings(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => Value::Array(items.iter().map(trim_strings).collect()),
        Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), trim_strings(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalize_trims_nested_strings_and_drops_nulls() {
        let raw = json!({
            "name": "  Spring  ",
            "keywords": [" a ", "b "],
            "bid": null,
            "conditions": [{ "url": " /thanks " }]
        });
        assert_eq!(
            normalize_arguments(Some(&raw)),
            json!({ "name": "Spring", "keywords": ["a", "b"], "conditions": [{ "url": "/thanks" }] })
        );
        assert_eq!(normalize_arguments(None), json!({}));
    }

    #[test]
    fn validate_collects_every_violation() {
        let schema = json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1 },
                "name": { "type": "string" }
            },
            "additionalProperties": false
        });

        assert!(validate(&schema, &json!({ "limit": 5 })).is_ok());

        let err = validate(&schema, &json!({ "limit": 0, "name": 3 })).unwrap_err();
        match err {
            SchemaValidationError::Invalid(violations) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}

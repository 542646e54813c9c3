use jsonschema::validator_for;
use serde_json::Value;

use yandex_mcp_server::client::{ApiError, Service};
use yandex_mcp_server::protocol::{JsonRpcResponse, RpcId, ToolResult};

/// Wire shape of a `tools/call` result.
const TOOL_RESULT_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "MCP tool call result",
  "type": "object",
  "required": ["content"],
  "additionalProperties": false,
  "properties": {
    "content": {
      "type": "array",
      "minItems": 1,
      "items": {
        "type": "object",
        "required": ["type", "text"],
        "additionalProperties": false,
        "properties": {
          "type": { "const": "text" },
          "text": { "type": "string", "minLength": 1 }
        }
      }
    },
    "isError": { "const": true }
  }
}"#;

fn to_value(result: &ToolResult) -> Value {
    serde_json::to_value(result).unwrap()
}

#[test]
fn api_errors_serialize_as_error_tool_results() {
    let schema: Value = serde_json::from_str(TOOL_RESULT_SCHEMA).unwrap();
    let validator = validator_for(&schema).unwrap();

    let errors = [
        ApiError::MissingToken { service: Service::Direct },
        ApiError::remote(53, "Authorization error", Some("Invalid OAuth token")),
        ApiError::Status { status: 429 },
        ApiError::Timeout,
        ApiError::Transport("connection refused".into()),
    ];

    for err in errors {
        let value = to_value(&err.into());
        assert!(validator.is_valid(&value), "{value}");
        assert_eq!(value["isError"], true);
    }
}

#[test]
fn golden_error_tool_result() {
    let result: ToolResult = ApiError::remote(53, "Authorization error", Some("Invalid OAuth token")).into();
    let json_str = serde_json::to_string_pretty(&result).unwrap();

    let expected = r#"{
  "content": [
    {
      "type": "text",
      "text": "API Error (53): Authorization error. Invalid OAuth token"
    }
  ],
  "isError": true
}"#;

    assert_eq!(json_str.trim(), expected.trim(), "tool error JSON snapshot mismatch");
}

#[test]
fn successful_results_omit_is_error() {
    let schema: Value = serde_json::from_str(TOOL_RESULT_SCHEMA).unwrap();
    let validator = validator_for(&schema).unwrap();

    let value = to_value(&ToolResult::text("Campaign 7 updated successfully."));
    assert!(validator.is_valid(&value));
    assert!(value.get("isError").is_none());
}

#[test]
fn tool_result_travels_inside_jsonrpc_success() {
    let result = ToolResult::error("Unknown tool: direct_launch_rockets");
    let response = JsonRpcResponse::success(Some(RpcId::Number(9)), serde_json::to_value(&result).unwrap());
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], 9);
    assert!(value.get("error").is_none());
    assert_eq!(value["result"]["isError"], true);
}

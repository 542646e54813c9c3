pub mod direct;
pub mod metrika;

use std::future::Future;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::client::{ApiError, YandexClient};
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolParams,
    ToolResult,
};
use crate::registry::{self, ToolDescriptor};
use crate::schema;

use direct::BatchAction;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INSTRUCTIONS: &str = "Tools for Yandex Direct (advertising campaigns, ad groups, ads, \
keywords, bids and statistics reports) and Yandex Metrika (counters, goals and traffic \
reports). Money is given in currency units. Listing and report tools accept \
response_format \"markdown\" (default) or \"json\". New and updated ads must be submitted \
with direct_moderate_ads before they are shown.";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, client: &YandexClient) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        debug!(method = %req.method, "notification received");
        return None;
    }

    match req.method.as_str() {
        "initialize" => {
            let params = req
                .params
                .clone()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v).ok());
            if let Some(params) = params {
                let client_info = params.client_info.as_ref();
                info!(
                    protocol = params.protocol_version.as_deref().unwrap_or("unknown"),
                    client = client_info.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client_info.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    "initialize"
                );
            }

            let result = json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "yandex-mcp-server",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": INSTRUCTIONS
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(req.id.clone(), registry::tools_list())),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = call_tool(&params, client).await;
            match serde_json::to_value(&tool_result) {
                Ok(result) => Some(JsonRpcResponse::success(req.id.clone(), result)),
                Err(e) => Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Cannot serialize tool result: {e}")),
                )),
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run one `tools/call`. Every failure comes back as an error tool result.
pub async fn call_tool(params: &ToolCallParams, client: &YandexClient) -> ToolResult {
    let Some(tool) = registry::find(&params.name) else {
        return ToolResult::error(format!("Unknown tool: {}", params.name));
    };
    let args = params.arguments.as_ref();

    use direct::{adgroups, ads, campaigns, keywords, statistics};
    use metrika::{counters, goals, reports};

    match tool.name {
        "direct_get_campaigns" => run(tool, args, |p| campaigns::get(p, client)).await,
        "direct_suspend_campaigns" => {
            run(tool, args, |p| campaigns::change_state(p, BatchAction::Suspend, client)).await
        }
        "direct_resume_campaigns" => {
            run(tool, args, |p| campaigns::change_state(p, BatchAction::Resume, client)).await
        }
        "direct_archive_campaigns" => {
            run(tool, args, |p| campaigns::change_state(p, BatchAction::Archive, client)).await
        }
        "direct_unarchive_campaigns" => {
            run(tool, args, |p| campaigns::change_state(p, BatchAction::Unarchive, client)).await
        }
        "direct_delete_campaigns" => {
            run(tool, args, |p| campaigns::change_state(p, BatchAction::Delete, client)).await
        }
        "direct_update_campaign" => run(tool, args, |p| campaigns::update(p, client)).await,

        "direct_get_adgroups" => run(tool, args, |p| adgroups::get(p, client)).await,
        "direct_create_adgroup" => run(tool, args, |p| adgroups::create(p, client)).await,
        "direct_update_adgroup" => run(tool, args, |p| adgroups::update(p, client)).await,

        "direct_get_ads" => run(tool, args, |p| ads::get(p, client)).await,
        "direct_create_text_ad" => run(tool, args, |p| ads::create_text_ad(p, client)).await,
        "direct_update_ad" => run(tool, args, |p| ads::update(p, client)).await,
        "direct_moderate_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Moderate, client)).await
        }
        "direct_suspend_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Suspend, client)).await
        }
        "direct_resume_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Resume, client)).await
        }
        "direct_archive_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Archive, client)).await
        }
        "direct_unarchive_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Unarchive, client)).await
        }
        "direct_delete_ads" => {
            run(tool, args, |p| ads::change_state(p, BatchAction::Delete, client)).await
        }

        "direct_get_keywords" => run(tool, args, |p| keywords::get(p, client)).await,
        "direct_add_keywords" => run(tool, args, |p| keywords::add(p, client)).await,
        "direct_set_keyword_bids" => run(tool, args, |p| keywords::set_bids(p, client)).await,
        "direct_delete_keywords" => run(tool, args, |p| keywords::delete(p, client)).await,

        "direct_get_statistics" => run(tool, args, |p| statistics::get(p, client)).await,

        "metrika_get_counters" => run(tool, args, |p| counters::list(p, client)).await,
        "metrika_get_counter" => run(tool, args, |p| counters::get(p, client)).await,
        "metrika_create_counter" => run(tool, args, |p| counters::create(p, client)).await,
        "metrika_delete_counter" => run(tool, args, |p| counters::delete(p, client)).await,
        "metrika_get_goals" => run(tool, args, |p| goals::list(p, client)).await,
        "metrika_create_goal" => run(tool, args, |p| goals::create(p, client)).await,
        "metrika_delete_goal" => run(tool, args, |p| goals::delete(p, client)).await,
        "metrika_get_report" => run(tool, args, |p| reports::get(p, client)).await,
        "metrika_get_report_by_time" => run(tool, args, |p| reports::by_time(p, client)).await,

        other => ToolResult::error(format!("Unknown tool: {other}")),
    }
}

/// Validate and decode the arguments, then run the handler.
async fn run<P, F, Fut>(tool: &ToolDescriptor, arguments: Option<&Value>, handler: F) -> ToolResult
where
    P: ToolParams,
    F: FnOnce(P) -> Fut,
    Fut: Future<Output = Result<ToolResult, ApiError>>,
{
    let params = match parse_arguments::<P>(tool.name, arguments) {
        Ok(params) => params,
        Err(message) => {
            debug!(tool = tool.name, "rejected arguments: {message}");
            return ToolResult::error(message);
        }
    };

    debug!(tool = tool.name, "calling tool");
    match handler(params).await {
        Ok(result) => result,
        Err(err) => {
            warn!(tool = tool.name, code = err.code(), "tool call failed: {err}");
            err.into()
        }
    }
}

/// Normalize, schema-check and deserialize tool arguments.
pub fn parse_arguments<P: ToolParams>(tool: &str, arguments: Option<&Value>) -> Result<P, String> {
    let arguments = schema::normalize_arguments(arguments);

    schema::validate(&P::input_schema(), &arguments)
        .map_err(|e| format!("Invalid arguments for {tool}: {e}"))?;

    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments for {tool}: {e}"))
}

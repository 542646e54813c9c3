//! Shared fixtures: a client wired to a wiremock server.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use wiremock::MockServer;

use yandex_mcp_server::client::YandexClient;
use yandex_mcp_server::config::ServerConfig;
use yandex_mcp_server::handlers;
use yandex_mcp_server::protocol::{ToolCallParams, ToolResult};

pub const TOKEN: &str = "test-token";

/// Direct base path under the mock server, mirroring the real `/json/v5`.
pub const DIRECT_PREFIX: &str = "/json/v5";

pub fn test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        unified_token: Some(TOKEN.to_string()),
        direct_token: None,
        metrika_token: None,
        client_login: None,
        use_sandbox: false,
        direct_url_override: Some(format!("{base_url}{DIRECT_PREFIX}")),
        metrika_url_override: Some(base_url.to_string()),
        request_timeout: Duration::from_secs(5),
        report_timeout: Duration::from_secs(5),
    }
}

pub fn client_for(server: &MockServer) -> YandexClient {
    YandexClient::new(test_config(&server.uri())).expect("test HTTP client must initialize")
}

pub fn client_with(config: ServerConfig) -> YandexClient {
    YandexClient::new(config).expect("test HTTP client must initialize")
}

/// A client whose endpoints are never reached.
pub fn offline_client() -> YandexClient {
    client_with(test_config("http://127.0.0.1:9"))
}

pub async fn call(client: &YandexClient, name: &str, arguments: Value) -> ToolResult {
    let params = ToolCallParams {
        name: name.to_string(),
        arguments: Some(arguments),
    };
    handlers::call_tool(&params, client).await
}

pub fn direct_path(service: &str) -> String {
    format!("{DIRECT_PREFIX}/{service}")
}

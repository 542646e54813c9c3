//! HTTP access to the Yandex Direct and Yandex Metrika APIs.
//!
//! Every call resolves its token through [`ServerConfig`], sends the
//! service-specific headers, and maps failures (non-2xx statuses, Direct's
//! in-body `error` objects, timeouts, transport faults) to [`ApiError`].

pub mod error;

pub use error::{ApiError, Service};

use reqwest::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ServerConfig;

/// Outcome of a Direct report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The report is ready; body is TSV.
    Ready(String),
    /// The report is queued offline; `retry_in` is the server hint in seconds.
    Pending { retry_in: Option<u64> },
}

/// Shared client for both Yandex services.
pub struct YandexClient {
    http: Client,
    config: ServerConfig,
}

impl YandexClient {
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Call `{direct}/{service}` with the JSON-RPC-like `{method, params}`
    /// body and return the `result` object.
    pub async fn direct(
        &self,
        service: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, ApiError> {
        let token = self.direct_token()?;
        debug!(service, method, "calling Yandex Direct");

        let response = self
            .direct_request(service, token)
            .json(&json!({ "method": method, "params": params }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(service, method, status = status.as_u16(), "Yandex Direct responded");

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("Direct returned invalid JSON: {e}")))?;

        if let Some(err) = direct_body_error(&value) {
            return Err(err);
        }

        Ok(value.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Request a statistics report from `{direct}/reports` in online mode.
    pub async fn direct_report(&self, definition: Value) -> Result<ReportOutcome, ApiError> {
        let token = self.direct_token()?;
        debug!(service = "reports", "requesting Yandex Direct report");

        let response = self
            .direct_request("reports", token)
            .timeout(self.config.report_timeout)
            .header("processingMode", "auto")
            .header("returnMoneyInMicros", "false")
            .header("skipReportHeader", "true")
            .header("skipColumnHeader", "false")
            .header("skipReportSummary", "true")
            .json(&json!({ "params": definition }))
            .send()
            .await?;

        let status = response.status();
        debug!(service = "reports", status = status.as_u16(), "Yandex Direct responded");

        match status {
            StatusCode::OK => Ok(ReportOutcome::Ready(response.text().await?)),
            StatusCode::CREATED | StatusCode::ACCEPTED => {
                let retry_in = response
                    .headers()
                    .get("retryIn")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok());
                Ok(ReportOutcome::Pending { retry_in })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(error_from_body(status, &body))
            }
        }
    }

    /// Call a Metrika endpoint (`path` starts with `/`).
    ///
    /// Empty and `204 No Content` answers read as `{"success": true}`.
    pub async fn metrika(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let token = self
            .config
            .metrika_token()
            .ok_or(ApiError::MissingToken { service: Service::Metrika })?;

        let url = format!("{}{}", self.config.metrika_base_url(), path);
        debug!(method = %method, path, "calling Yandex Metrika");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("OAuth {token}"));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(method = %method, path, status = status.as_u16(), "Yandex Metrika responded");

        if !status.is_success() {
            return Err(error_from_body(status, &text));
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(json!({ "success": true }));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("Metrika returned invalid JSON: {e}")))
    }

    pub async fn metrika_get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.metrika(Method::GET, path, query, None).await
    }

    pub async fn metrika_post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.metrika(Method::POST, path, &[], Some(body)).await
    }

    pub async fn metrika_delete(&self, path: &str) -> Result<Value, ApiError> {
        self.metrika(Method::DELETE, path, &[], None).await
    }

    fn direct_token(&self) -> Result<&str, ApiError> {
        self.config
            .direct_token()
            .ok_or(ApiError::MissingToken { service: Service::Direct })
    }

    fn direct_request(&self, service: &str, token: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.direct_base_url(), service);
        let mut request = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT_LANGUAGE, "ru");
        if let Some(login) = &self.config.client_login {
            request = request.header("Client-Login", login.as_str());
        }
        request
    }
}

/// Direct reports application errors as HTTP 200 with an `error` object.
fn direct_body_error(body: &Value) -> Option<ApiError> {
    let error = body.get("error")?.as_object()?;
    let code = error
        .get("error_code")
        .and_then(|c| c.as_i64().or_else(|| c.as_str()?.parse().ok()))
        .unwrap_or(0);
    let message = error
        .get("error_string")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error");
    let detail = error.get("error_detail").and_then(Value::as_str);
    Some(ApiError::remote(code, message, detail))
}

/// Map a non-2xx answer to an error, preferring the explanation in the body.
///
/// Direct puts it under `error.error_string` / `error.error_detail`;
/// Metrika uses a top-level `message` (or the first of `errors`).
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let code = i64::from(status.as_u16());
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return ApiError::Status { status: status.as_u16() };
    };

    if let Some(error) = value.get("error").and_then(Value::as_object) {
        if let Some(message) = error
            .get("error_string")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            let detail = error.get("error_detail").and_then(Value::as_str);
            return ApiError::remote(code, message, detail);
        }
    }

    let metrika_message = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            value
                .get("errors")?
                .as_array()?
                .first()?
                .get("message")?
                .as_str()
        })
        .filter(|m| !m.is_empty());

    match metrika_message {
        Some(message) => ApiError::remote(code, message, None),
        None => ApiError::Status { status: status.as_u16() },
    }
}

use std::fmt;

use crate::protocol::ToolResult;

/// Remote service a call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Direct,
    Metrika,
}

impl Service {
    /// Environment variable holding the service-specific token.
    pub fn token_var(self) -> &'static str {
        match self {
            Self::Direct => "YANDEX_DIRECT_TOKEN",
            Self::Metrika => "YANDEX_METRIKA_TOKEN",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("Direct"),
            Self::Metrika => f.write_str("Metrika"),
        }
    }
}

/// Failure of a remote call, rendered into the uniform tool error text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(
        "Configuration Error: Yandex {service} API token not configured. \
         Set {} or YANDEX_TOKEN environment variable.",
        .service.token_var()
    )]
    MissingToken { service: Service },

    /// The remote side explained the failure.
    #[error("API Error ({code}): {message}")]
    Remote { code: i64, message: String },

    /// Non-2xx without a usable explanation in the body.
    #[error("API Error: {}", status_hint(.status))]
    Status { status: u16 },

    #[error("Request timed out. The operation may still complete on the server.")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "configuration_error",
            Self::Remote { .. } | Self::Status { .. } => "api_error",
            Self::Timeout => "timeout",
            Self::Transport(_) => "network_error",
            Self::Decode(_) => "decode_error",
        }
    }

    /// Build a `Remote` error from a message and an optional detail,
    /// joined as `message. detail`.
    pub fn remote(code: i64, message: &str, detail: Option<&str>) -> Self {
        let message = match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(detail) => format!("{message}. {detail}"),
            None => message.to_string(),
        };
        Self::Remote {
            code,
            message: message.trim().to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Every failure becomes a tool result with `isError: true` carrying the
/// human-readable message.
impl From<ApiError> for ToolResult {
    fn from(err: ApiError) -> Self {
        ToolResult::error(err.to_string())
    }
}

fn status_hint(status: &u16) -> String {
    let hint = match *status {
        400 => "Bad request. Check your parameters.",
        401 => "Authentication failed. Check your API token.",
        403 => "Access denied. Check permissions for this operation.",
        404 => "Resource not found. Check the ID.",
        429 => "Rate limit exceeded. Wait before making more requests.",
        500 => "Server error. Try again later.",
        503 => "Service unavailable. Try again later.",
        _ => return format!("Request failed with status {status}"),
    };
    hint.to_string()
}

use std::time::Duration;

/// Production endpoint of the Yandex Direct JSON API (v5).
pub const DIRECT_API_URL: &str = "https://api.direct.yandex.com/json/v5";
/// Sandbox endpoint of the Yandex Direct JSON API (v5).
pub const DIRECT_SANDBOX_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5";
/// Yandex Metrika API root (management and stat APIs live below it).
pub const METRIKA_API_URL: &str = "https://api-metrika.yandex.net";

/// Default timeout for regular API requests (30 seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default timeout for Direct report generation (120 seconds).
const DEFAULT_REPORT_TIMEOUT_SECS: u64 = 120;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub unified_token: Option<String>,
    pub direct_token: Option<String>,
    pub metrika_token: Option<String>,
    pub client_login: Option<String>,
    pub use_sandbox: bool,
    pub direct_url_override: Option<String>,
    pub metrika_url_override: Option<String>,
    pub request_timeout: Duration,
    pub report_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `YANDEX_TOKEN` (optional) : OAuth token shared by Direct and Metrika
    /// - `YANDEX_DIRECT_TOKEN` / `YANDEX_METRIKA_TOKEN` (optional) : per-service tokens, take precedence
    /// - `YANDEX_CLIENT_LOGIN` (optional) : agency client login sent as `Client-Login`
    /// - `YANDEX_USE_SANDBOX` (optional, default false) : route Direct calls to the sandbox
    /// - `YANDEX_DIRECT_API_URL` / `YANDEX_METRIKA_API_URL` (optional) : base URL overrides
    /// - `YANDEX_REQUEST_TIMEOUT_SECS` (optional, default 30)
    /// - `YANDEX_REPORT_TIMEOUT_SECS` (optional, default 120)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let use_sandbox = var("YANDEX_USE_SANDBOX")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let request_timeout = parse_secs(
            "YANDEX_REQUEST_TIMEOUT_SECS",
            var("YANDEX_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let report_timeout = parse_secs(
            "YANDEX_REPORT_TIMEOUT_SECS",
            var("YANDEX_REPORT_TIMEOUT_SECS"),
            DEFAULT_REPORT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            unified_token: var("YANDEX_TOKEN"),
            direct_token: var("YANDEX_DIRECT_TOKEN"),
            metrika_token: var("YANDEX_METRIKA_TOKEN"),
            client_login: var("YANDEX_CLIENT_LOGIN"),
            use_sandbox,
            direct_url_override: var("YANDEX_DIRECT_API_URL"),
            metrika_url_override: var("YANDEX_METRIKA_API_URL"),
            request_timeout,
            report_timeout,
        })
    }

    /// Token for Direct calls: the service token, falling back to the unified one.
    pub fn direct_token(&self) -> Option<&str> {
        self.direct_token
            .as_deref()
            .or(self.unified_token.as_deref())
    }

    /// Token for Metrika calls: the service token, falling back to the unified one.
    pub fn metrika_token(&self) -> Option<&str> {
        self.metrika_token
            .as_deref()
            .or(self.unified_token.as_deref())
    }

    /// Direct base URL without a trailing slash.
    ///
    /// An explicit override wins over the sandbox switch.
    pub fn direct_base_url(&self) -> &str {
        let url = match &self.direct_url_override {
            Some(url) => url.as_str(),
            None if self.use_sandbox => DIRECT_SANDBOX_URL,
            None => DIRECT_API_URL,
        };
        url.trim_end_matches('/')
    }

    /// Metrika base URL without a trailing slash.
    pub fn metrika_base_url(&self) -> &str {
        self.metrika_url_override
            .as_deref()
            .unwrap_or(METRIKA_API_URL)
            .trim_end_matches('/')
    }
}

fn parse_secs(name: &str, raw: Option<String>, default: u64) -> Result<Duration, String> {
    let secs = match raw {
        Some(val) => match val.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => return Err(format!("{name} must be a positive integer")),
        },
        None => default,
    };
    Ok(Duration::from_secs(secs))
}

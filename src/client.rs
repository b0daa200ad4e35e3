//! GitHub API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! It is the production [`Connector`]; issue, label and assignee operations
//! live on the capability types that drive it.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::connector::{ApiRequest, Connector};
use crate::error::{Error, RemoteError, Result};

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("ghissues/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Low-level GitHub REST client.
///
/// Handles authentication and HTTP requests. Each call to
/// [`Connector::send`] performs exactly one request; there is no retry.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use ghissues::GithubClient;
///
/// # fn example() -> ghissues::Result<()> {
/// // Create from environment variables
/// let client = GithubClient::from_env()?;
///
/// // Or configure manually
/// let client = GithubClient::new("ghp_your_token", "https://api.github.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Create a client from environment variables.
    ///
    /// Uses `GITHUB_TOKEN` for authentication and optionally `GITHUB_API_URL`
    /// for the base URL (defaults to `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN").map_err(|_| {
            Error::ConfigMissing("GITHUB_TOKEN environment variable not set".to_string())
        })?;

        let base_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - GitHub personal access or installation token
    /// * `base_url` - Base URL for the API (e.g., `https://api.github.com` or a
    ///   GitHub Enterprise `https://ghe.example.com/api/v3`)
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::ConfigMissing("GitHub token is empty".to_string()));
        }

        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path and query against the base URL.
    fn resolve(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if let Some(query) = &request.query {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if let Some(retry_after_secs) = Self::rate_limit(&response) {
            tracing::warn!(status = status.as_u16(), ?retry_after_secs, "rate limited by GitHub");
            return Err(RemoteError::RateLimited { retry_after_secs }.into());
        }

        let message = Self::extract_error_message(response, status).await;
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    /// Detect primary (403 + exhausted quota) and secondary (429) rate limits.
    ///
    /// Returns `Some(retry_after)` when the response is a rate-limit rejection.
    fn rate_limit(response: &Response) -> Option<Option<u64>> {
        let status = response.status();
        let headers = response.headers();
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        let exhausted = header_u64("x-ratelimit-remaining") == Some(0);
        if status != StatusCode::TOO_MANY_REQUESTS
            && !(status == StatusCode::FORBIDDEN && exhausted)
        {
            return None;
        }

        let retry_after = header_u64("retry-after").or_else(|| {
            let reset = header_u64("x-ratelimit-reset")?;
            let now = chrono::Utc::now().timestamp();
            u64::try_from(now).ok().map(|now| reset.saturating_sub(now))
        });
        Some(retry_after)
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // GitHub error documents carry a `message` field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[async_trait]
impl Connector for GithubClient {
    #[tracing::instrument(
        skip(self, request),
        fields(method = %request.method, path = %request.path)
    )]
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.resolve(&request)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(&self.token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let response = Self::check_response(response).await?;
        tracing::debug!(status = response.status().as_u16(), "request completed");

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

//! Provider error types.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Classify a transport-level failure.
    pub fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout_secs)
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }

    /// Classify an error status. `retry_after` is the raw header value, if any.
    pub fn from_status(status: u16, body: String, retry_after: Option<&str>, model: &str) -> Self {
        match status {
            429 => ProviderError::RateLimited {
                retry_after_ms: retry_after
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(5)
                    * 1000,
            },
            401 | 403 => ProviderError::AuthenticationFailed(body),
            404 => ProviderError::ModelNotFound(model.to_string()),
            _ => ProviderError::ApiError {
                status,
                message: body,
            },
        }
    }

    /// The response body could not be decoded.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        ProviderError::ApiError {
            status: 0,
            message: format!("failed to parse response: {err}"),
        }
    }
}

/// Build the shared HTTP client for a provider.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::NetworkError(format!("failed to build HTTP client: {e}")))
}

/// Turn a non-success response into a `ProviderError`.
pub(crate) async fn check_status(
    response: reqwest::Response,
    model: &str,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::from_status(
        status,
        body,
        retry_after.as_deref(),
        model,
    ))
}

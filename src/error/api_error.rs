use serde::Deserialize;
use thiserror::Error;

/// Client-wide error type covering every failure an API call can surface.
///
/// Each HTTP status class maps to its own variant so callers can decide
/// how to react (fix the request, re-authenticate, back off, retry later)
/// without inspecting status codes themselves. The original status and the
/// remote message are preserved for diagnostics.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request content rejected by the API (bad recipient, missing
    /// personalisation key, invalid template id)
    #[error("Validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Invalid or stale bearer token, revoked credentials, or clock skew
    /// beyond the server's tolerance
    #[error("Authorization failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Requested notification, template, or version does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Too many requests; the caller should back off
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        /// Server-supplied back-off hint in seconds, when present
        retry_after: Option<u64>,
    },

    /// Remote service fault; treated as transient
    #[error("API server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Connection failure, timeout, or an undecodable success body
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Local failure signing the request token
    #[error("Failed to sign request token")]
    Token {
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    /// Combined API key did not contain a service id and secret
    #[error("Invalid API key: {reason}")]
    ApiKey { reason: String },
}

/// Type alias for Result with ClientError to simplify function signatures
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body shape returned by the API on non-2xx responses:
/// `{"status_code": 400, "errors": [{"error": "...", "message": "..."}]}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ClientError {
    /// Classifies a non-2xx response into an error kind.
    ///
    /// The body is parsed as the documented error shape when possible; a
    /// non-JSON body is carried verbatim so nothing the server said is
    /// lost. Classification is driven by the status code alone.
    pub(crate) fn from_response(status: u16, body: &str, retry_after: Option<u64>) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ClientError::Auth { status, message },
            404 => ClientError::NotFound { message },
            429 => ClientError::RateLimit {
                message,
                retry_after,
            },
            400..=499 => ClientError::Validation { status, message },
            _ => ClientError::Server { status, message },
        }
    }
}

/// Pulls the remote message(s) out of an error body, joining multiple
/// entries in order. Falls back to the raw body text.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        _ => body.trim().to_string(),
    }
}

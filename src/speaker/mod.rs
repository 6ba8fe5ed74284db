//! Request dispatch for the Notify API.
//!
//! The [`Speaker`] is the single choke point for outbound HTTP: it owns
//! the base URL and credentials, signs a fresh bearer token per request,
//! and translates every response into either a decoded payload or a
//! classified [`ClientError`]. Nothing above this module touches HTTP.

mod url;

pub use url::escape_segment;

use std::time::Duration;

use reqwest::{Method, header};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::auth;
use crate::error::{ClientError, ClientResult};
use crate::models::{MessageKind, NotificationFilters};

/// Default API endpoint
pub const PRODUCTION_BASE_URL: &str = "https://api.notifications.service.gov.uk";

const USER_AGENT: &str = concat!("NOTIFY-API-RUST-CLIENT/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Length of the UUIDs embedded at the tail of a combined API key
const UUID_LEN: usize = 36;

/// Dispatches authenticated requests against the API.
///
/// A `Speaker` is configured once with one set of credentials; the base
/// URL may be reassigned (for a sandbox or staging target) but should be
/// set before issuing concurrent requests. Each call mints its own bearer
/// token and performs an independent exchange, so a single instance is
/// safe to share across tasks.
#[derive(Clone)]
pub struct Speaker {
    service_id: String,
    secret_token: String,
    base_url: String,
    http: reqwest::Client,
}

// Manual impl keeps the secret out of debug output
impl std::fmt::Debug for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Speaker")
            .field("service_id", &self.service_id)
            .field("secret_token", &"[redacted]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Speaker {
    /// Creates a speaker from a service id and secret, with the default
    /// timeouts and the production base URL
    ///
    /// # Arguments
    /// * `service_id` - Stable service identifier, used as the token issuer
    /// * `secret_token` - Shared secret for signing request tokens
    pub fn new(
        service_id: impl Into<String>,
        secret_token: impl Into<String>,
    ) -> ClientResult<Self> {
        Self::with_timeout(service_id, secret_token, DEFAULT_TIMEOUT)
    }

    /// Creates a speaker with an explicit request timeout
    ///
    /// The deadline covers the whole exchange; a request that exceeds it
    /// fails with a [`ClientError::Transport`].
    pub fn with_timeout(
        service_id: impl Into<String>,
        secret_token: impl Into<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Transport {
                message: "failed to build HTTP client".to_string(),
                source: Some(e.into()),
            })?;

        Ok(Self {
            service_id: service_id.into(),
            secret_token: secret_token.into(),
            base_url: PRODUCTION_BASE_URL.to_string(),
            http,
        })
    }

    /// Creates a speaker from a combined API key
    ///
    /// A key embeds both credentials after a free-form name:
    /// `{name}-{service_id}-{secret_token}`, where the last two parts are
    /// UUIDs. Both are extracted and validated here so a truncated or
    /// mangled key fails at construction rather than with a 403 later.
    pub fn from_api_key(api_key: &str) -> ClientResult<Self> {
        let (service_id, secret_token) = split_api_key(api_key)?;
        Self::new(service_id, secret_token)
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Points the speaker at a different API endpoint.
    ///
    /// Configure before issuing concurrent requests; reads during
    /// concurrent traffic are safe, racing writes are not ordered.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// POSTs a message send request to the canonical path for a kind
    /// (`/v2/notifications/email` or `/v2/notifications/sms`)
    ///
    /// # Returns
    /// The decoded response body on 2xx, a classified error otherwise
    pub async fn post<B>(&self, kind: MessageKind, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let path = format!("/v2/notifications/{}", kind.as_path_segment());
        self.dispatch(Method::POST, &path, &[], Some(body)).await
    }

    /// GETs a single notification by id, or the filtered notifications
    /// listing when `id` is `None`
    pub async fn get(&self, id: Option<&str>, filters: &NotificationFilters) -> ClientResult<Value> {
        match id {
            Some(id) => {
                let path = format!("/v2/notifications/{}", escape_segment(id));
                self.dispatch::<()>(Method::GET, &path, &[], None).await
            }
            None => {
                self.dispatch::<()>(Method::GET, "/v2/notifications", &filters.to_query(), None)
                    .await
            }
        }
    }

    /// POSTs to a fully-specified path (template preview generation)
    pub async fn post_with_url<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::POST, path, &[], Some(body)).await
    }

    /// GETs a fully-specified path with the given query parameters
    /// (template-by-id, template-by-version, template listing)
    pub async fn get_with_url(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value> {
        self.dispatch::<()>(Method::GET, path, query, None).await
    }

    /// Builds, signs, and executes one request.
    ///
    /// A fresh token is minted per call so the issued-at claim reflects
    /// the real send time. The outcome is exactly one of: a decoded JSON
    /// payload (any 2xx) or a classified error (anything else).
    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = url::join_url(&self.base_url, path);
        let token = auth::create_token(&self.service_id, &self.secret_token)?;

        debug!(%method, path, "dispatching API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| ClientError::Transport {
            message: format!("{} {} failed: {}", method, path, e),
            source: Some(e.into()),
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), "API request succeeded");
            response.json::<Value>().await.map_err(|e| ClientError::Transport {
                message: format!("{} {} returned an undecodable body: {}", method, path, e),
                source: Some(e.into()),
            })
        } else {
            debug!(%method, path, status = status.as_u16(), "API request failed");
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            let body_text = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(
                status.as_u16(),
                &body_text,
                retry_after,
            ))
        }
    }
}

/// Extracts `(service_id, secret_token)` from the tail of a combined key.
fn split_api_key(api_key: &str) -> ClientResult<(String, String)> {
    if !api_key.is_ascii() {
        return Err(ClientError::ApiKey {
            reason: "key contains non-ASCII characters".to_string(),
        });
    }
    if api_key.len() < 2 * UUID_LEN + 1 {
        return Err(ClientError::ApiKey {
            reason: "key is too short to contain a service id and secret".to_string(),
        });
    }

    let service_id = &api_key[api_key.len() - 2 * UUID_LEN - 1..api_key.len() - UUID_LEN - 1];
    let secret_token = &api_key[api_key.len() - UUID_LEN..];

    Uuid::parse_str(service_id).map_err(|_| ClientError::ApiKey {
        reason: "embedded service id is not a valid UUID".to_string(),
    })?;
    Uuid::parse_str(secret_token).map_err(|_| ClientError::ApiKey {
        reason: "embedded secret is not a valid UUID".to_string(),
    })?;

    Ok((service_id.to_string(), secret_token.to_string()))
}

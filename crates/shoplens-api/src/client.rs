//! HTTP client for the dashboard backend.
//!
//! Wraps `reqwest` with header policy (API key, conditional bearer token),
//! `{data, success}` envelope unwrapping, and a single refresh-and-retry
//! cycle on 401 responses. Endpoint-specific shapes live in the service
//! layer; this module only moves JSON.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use shoplens_core::AppConfig;

use crate::endpoints::{self, requires_auth};
use crate::error::{default_status_message, ApiError};
use crate::session::SessionStore;

/// Query string under construction. Repeated keys are the wire format for
/// multi-value filters (`product_ids=1&product_ids=2`), so values accumulate
/// as flat pairs rather than a map.
#[derive(Debug, Default, Clone)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_owned(), value.to_string()));
        self
    }

    /// Appends the pair only when the value is present.
    #[must_use]
    pub fn push_opt(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.to_owned(), value.to_string()));
        }
        self
    }

    /// Appends one pair per element under the same key.
    #[must_use]
    pub fn push_all<T: ToString>(mut self, key: &str, values: &[T]) -> Self {
        for value in values {
            self.pairs.push((key.to_owned(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn apply(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &self.pairs {
            pairs.append_pair(k, v);
        }
    }
}

/// Client for the dashboard REST API.
///
/// Holds the HTTP client, base URL, optional API key, and a handle to the
/// session store for token attachment and rotation. Use [`ApiClient::new`]
/// for production or [`ApiClient::with_base_url`] to point at a mock server
/// in tests.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if the configured base
    /// URL does not parse.
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self, ApiError> {
        Self::build(
            &config.api_base_url,
            config.api_key.clone(),
            config.request_timeout_secs,
            &format!("{}/{}", config.app_name, config.app_version),
            session,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::new`].
    pub fn with_base_url(base_url: &str, session: SessionStore) -> Result<Self, ApiError> {
        Self::build(base_url, None, 30, "shoplens/0.1 (test)", session)
    }

    fn build(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
        session: SessionStore,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined paths land under it rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// GET with an empty query.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, &Query::new(), None).await
    }

    /// GET with query parameters.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get_with(&self, path: &str, query: &Query) -> Result<Value, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST with a JSON body.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, &Query::new(), Some(body))
            .await
    }

    /// PUT with a JSON body.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, &Query::new(), Some(body))
            .await
    }

    /// DELETE with an empty body.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, &Query::new(), None)
            .await
    }

    /// Sends a request, unwrapping the `{data, success}` envelope when present.
    ///
    /// A 401 on any path except the refresh endpoint triggers one refresh of
    /// the session tokens followed by a single retry. A second 401, or a
    /// failed refresh, clears the session and surfaces
    /// [`ApiError::Unauthorized`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::Status`] for non-2xx responses other than recoverable 401s.
    /// - [`ApiError::Unauthorized`] when the refresh cycle cannot recover.
    /// - [`ApiError::SessionStorage`] if persisting rotated tokens fails.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let first = self
            .send_once(method.clone(), path, query, body.clone())
            .await?;

        let (status, payload) = match first {
            Outcome::Success(value) => return Ok(value),
            Outcome::Failure { status, payload } => (status, payload),
        };

        if path == endpoints::AUTH_REFRESH && status == StatusCode::UNAUTHORIZED {
            self.session.clear()?;
            return Err(ApiError::Unauthorized);
        }
        if status != StatusCode::UNAUTHORIZED {
            return Err(status_error(status, &payload));
        }

        tracing::debug!(path, "401 response, attempting token refresh");
        self.refresh().await?;

        match self.send_once(method, path, query, body).await? {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { status, payload } => {
                if status == StatusCode::UNAUTHORIZED {
                    tracing::warn!(path, "retry after refresh still unauthorized, logging out");
                    self.session.clear()?;
                    Err(ApiError::Unauthorized)
                } else {
                    Err(status_error(status, &payload))
                }
            }
        }
    }

    /// Exchanges the stored refresh token for a new token pair and rotates
    /// the session. Any failure clears the session.
    ///
    /// # Errors
    /// [`ApiError::Unauthorized`] when no refresh token is stored or the
    /// server rejects it; [`ApiError::SessionStorage`] if persisting the
    /// rotated pair fails.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.session.refresh_token() else {
            self.session.clear()?;
            return Err(ApiError::Unauthorized);
        };

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let outcome = self
            .send_once(Method::POST, endpoints::AUTH_REFRESH, &Query::new(), Some(body))
            .await;

        let value = match outcome {
            Ok(Outcome::Success(value)) => value,
            Ok(Outcome::Failure { status, .. }) => {
                tracing::warn!(status = status.as_u16(), "token refresh rejected");
                self.session.clear()?;
                return Err(ApiError::Unauthorized);
            }
            Err(e) => {
                self.session.clear()?;
                return Err(e);
            }
        };

        let access = value.get("access_token").and_then(Value::as_str);
        let refresh = value.get("refresh_token").and_then(Value::as_str);
        match (access, refresh) {
            (Some(access), Some(refresh)) => {
                self.session
                    .rotate_tokens(access.to_owned(), refresh.to_owned())?;
                tracing::debug!("session tokens rotated");
                Ok(())
            }
            _ => {
                tracing::warn!("refresh response missing token fields");
                self.session.clear()?;
                Err(ApiError::Unauthorized)
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
    ) -> Result<Outcome, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl(path.to_owned()))?;
        query.apply(&mut url);

        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }
        if requires_auth(&method, path) {
            if let Some(token) = self.session.access_token() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let payload = parse_body(&text);

        if status.is_success() {
            Ok(Outcome::Success(unwrap_envelope(payload)))
        } else {
            Ok(Outcome::Failure { status, payload })
        }
    }
}

enum Outcome {
    Success(Value),
    Failure { status: StatusCode, payload: Value },
}

/// An empty or non-JSON body becomes an empty object so callers never
/// special-case 204-style responses.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

/// Unwraps `{"data": ..., "success": ...}` envelopes; any other shape
/// passes through untouched.
fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("data") && map.contains_key("success") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn status_error(status: StatusCode, payload: &Value) -> ApiError {
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(
            || default_status_message(status.as_u16()).to_owned(),
            str::to_owned,
        );
    let code = payload
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_owned);
    ApiError::Status {
        status: status.as_u16(),
        message,
        code,
    }
}

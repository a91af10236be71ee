//! The HTTP door to the backend.
//!
//! [`ApiClient`] owns the base URL, the reqwest client, and the injected
//! session store. Every request attaches the bearer token when one is
//! present; a 401 response clears the token and raises the
//! login-required signal before the failure is returned to the caller.
//! Retry and caching are composed by callers, never here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, ErrorBody};
use crate::session::SessionStore;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A query string as name/value pairs.
pub type Query<'a> = &'a [(&'a str, String)];

// ============================================================================
// Api Client
// ============================================================================

/// HTTP client bound to one backend base URL and one session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    inner: Client,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g.
    /// `http://localhost:8000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unexpected`] if the base URL does not parse or
    /// the TLS stack cannot be initialized.
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, session, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn with_timeout(
        base_url: &str,
        session: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Unexpected(format!("Invalid base URL: {e}")))?;
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ceritadata/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            inner,
            session,
        })
    }

    /// Returns the session this client authenticates with.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ------------------------------------------------------------------------
    // Typed request methods
    // ------------------------------------------------------------------------

    /// GET returning a decoded value.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<T, ApiError> {
        let value = self.send(Method::GET, path, query, Body::None).await?;
        decode(value)
    }

    /// GET returning the raw JSON value. Useful when composing through
    /// the response cache, which stores [`Value`]s.
    pub async fn get_value(&self, path: &str, query: Query<'_>) -> Result<Value, ApiError> {
        self.send(Method::GET, path, query, Body::None).await
    }

    /// GET returning the raw body bytes (file exports).
    pub async fn get_bytes(&self, path: &str, query: Query<'_>) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(Method::GET, path, query, Body::None).await?;
        let response = self.check_status(response).await?;
        Ok(response.bytes().await.map_err(ApiError::from)?.to_vec())
    }

    /// POST with a JSON body.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to encode body: {e}")))?;
        let value = self.send(Method::POST, path, &[], Body::Json(body)).await?;
        decode(value)
    }

    /// POST with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.send(Method::POST, path, &[], Body::None).await?;
        decode(value)
    }

    /// POST with a multipart body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let value = self
            .send(Method::POST, path, &[], Body::Multipart(form))
            .await?;
        decode(value)
    }

    /// PUT with a JSON body.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to encode body: {e}")))?;
        let value = self.send(Method::PUT, path, &[], Body::Json(body)).await?;
        decode(value)
    }

    /// DELETE, ignoring the response body.
    pub async fn delete(&self, path: &str, query: Query<'_>) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, query, Body::None).await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Body,
    ) -> Result<Value, ApiError> {
        let response = self.dispatch(method, path, query, body).await?;
        let response = self.check_status(response).await?;

        let text = response.text().await.map_err(ApiError::from)?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Body,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path, query)?;
        debug!(method = %method, url = %url, "Dispatching request");

        let mut request = self.inner.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request = match body {
            Body::None => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        request.send().await.map_err(ApiError::from)
    }

    /// Maps a non-success response into the error taxonomy, tearing the
    /// session down first on 401.
    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Option<ErrorBody> = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok());

        if status == StatusCode::UNAUTHORIZED {
            // Side effect first, then the failure still reaches the
            // caller.
            warn!("Received 401, clearing session");
            self.session.set_token(None);
            self.session.require_login();
        }

        Err(ApiError::from_status(status.as_u16(), body))
    }

    /// Resolves a relative endpoint path plus query pairs against the
    /// base URL.
    fn endpoint(&self, path: &str, query: Query<'_>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ApiError::Unexpected("Base URL cannot carry path segments".to_string())
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Request Body
// ============================================================================

enum Body {
    None,
    Json(Value),
    Multipart(Form),
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:8000/api",
            Arc::new(MemorySession::new()),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let url = client().endpoint("admin/stories/7", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/admin/stories/7");
    }

    #[test]
    fn endpoint_encodes_query_pairs() {
        let url = client()
            .endpoint("stories/search", &[("q", "tenaga kerja".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/stories/search?q=tenaga+kerja"
        );
    }

    #[test]
    fn endpoint_encodes_path_query_values() {
        let url = client()
            .endpoint("admin/files", &[("path", "stories/7/cover.jpg".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/admin/files?path=stories%2F7%2Fcover.jpg"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::new("not a url", Arc::new(MemorySession::new()));
        assert!(result.is_err());
    }
}

//! Authentication operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use ceritadata_core::User;

use crate::error::ApiError;
use crate::http::ApiClient;

/// A successful login: the bearer token plus the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Client for login, logout, and the current user.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Logs in and stores the returned token into the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let session: AuthSession = self
            .client
            .post_json("login", &LoginRequest { email, password })
            .await?;
        self.client.session().set_token(Some(session.token.clone()));
        info!(user = %session.user.email, "Logged in");
        Ok(session)
    }

    /// Logs out on the backend and clears the local token.
    ///
    /// The local token is cleared even if the backend call fails; a dead
    /// session is no reason to stay logged in locally.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<serde_json::Value, ApiError> = self.client.post_empty("logout").await;
        self.client.session().set_token(None);
        result.map(|_| ())
    }

    /// Fetches the currently authenticated user.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("user", &[]).await
    }

    /// Exchanges the current token for a fresh one and stores it.
    pub async fn refresh_token(&self) -> Result<String, ApiError> {
        let response: TokenResponse = self.client.post_empty("refresh-token").await?;
        self.client
            .session()
            .set_token(Some(response.token.clone()));
        Ok(response.token)
    }
}

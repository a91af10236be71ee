//! User management.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use ceritadata_core::{NewUser, PasswordChange, User, UserRole};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Partial update for a user; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New login email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Client for the admin user endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: Arc<ApiClient>,
}

impl UserApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists all users.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("admin/users", &[]).await
    }

    /// Fetches one user.
    pub async fn get(&self, id: u64) -> Result<User, ApiError> {
        self.client.get(&format!("admin/users/{id}"), &[]).await
    }

    /// Creates a user.
    pub async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        self.client.post_json("admin/users", user).await
    }

    /// Updates a user.
    pub async fn update(&self, id: u64, update: &UserUpdate) -> Result<User, ApiError> {
        self.client
            .put_json(&format!("admin/users/{id}"), update)
            .await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete(&format!("admin/users/{id}"), &[]).await
    }

    /// Updates the current user's profile.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.client.put_json("admin/profile", update).await
    }

    /// Changes the current user's password.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let _: Value = self.client.put_json("admin/password", change).await?;
        Ok(())
    }
}

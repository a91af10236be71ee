//! User management types.

use serde::{Deserialize, Serialize};

/// Role of an admin-area user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Can create and edit stories.
    Admin,
    /// Can additionally approve and reject submissions.
    AdminApproval,
}

impl UserRole {
    /// True if this role may approve or reject pending stories.
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::AdminApproval)
    }
}

/// An admin-area user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role.
    pub role: UserRole,
}

/// Payload for changing the current user's password.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    /// Current password.
    pub current_password: String,
    /// New password.
    pub new_password: String,
}

//! Session token storage.
//!
//! The backend authenticates every admin call with a bearer token. The
//! token lives in an injected [`SessionStore`] rather than ambient
//! process-wide state, so tests and alternative front-ends can substitute
//! their own storage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

// ============================================================================
// Session Store Trait
// ============================================================================

/// Storage for the bearer token and the login-redirect signal.
///
/// [`crate::ApiClient`] reads the token before every call and, on a 401,
/// clears it and calls [`SessionStore::require_login`]. The consuming UI
/// polls [`SessionStore::login_required`] to drive its redirect.
pub trait SessionStore: Send + Sync {
    /// Returns the current token, if logged in.
    fn token(&self) -> Option<String>;

    /// Replaces the token. `None` logs out.
    ///
    /// Setting a token clears any pending login-required signal.
    fn set_token(&self, token: Option<String>);

    /// Signals that the session is no longer valid and the user must log
    /// in again.
    fn require_login(&self);

    /// True if a login redirect is pending.
    fn login_required(&self) -> bool;
}

// ============================================================================
// In-Memory Session
// ============================================================================

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
    login_required: AtomicBool,
}

impl MemorySession {
    /// Creates an empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
            login_required: AtomicBool::new(false),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        let logged_in = token.is_some();
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
        if logged_in {
            self.login_required.store(false, Ordering::Relaxed);
        }
        debug!(logged_in, "Session token updated");
    }

    fn require_login(&self) {
        self.login_required.store(true, Ordering::Relaxed);
    }

    fn login_required(&self) -> bool {
        self.login_required.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);
        assert!(!session.login_required());
    }

    #[test]
    fn login_clears_pending_redirect() {
        let session = MemorySession::new();
        session.require_login();
        assert!(session.login_required());

        session.set_token(Some("tok".to_string()));
        assert_eq!(session.token(), Some("tok".to_string()));
        assert!(!session.login_required());
    }

    #[test]
    fn logout_keeps_redirect_signal() {
        let session = MemorySession::with_token("tok");
        session.require_login();
        session.set_token(None);
        assert_eq!(session.token(), None);
        assert!(session.login_required());
    }
}

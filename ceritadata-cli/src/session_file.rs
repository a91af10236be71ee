//! File-backed session storage.
//!
//! The bearer token is kept in a JSON file under the user's config
//! directory so a login survives across invocations. Saves are atomic
//! (temp file + rename) and the file is owner-only on Unix. A failed
//! save is logged and otherwise ignored; losing persistence must never
//! take the running command down with it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ceritadata_client::SessionStore;

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Returns the default session file path.
///
/// - Linux: `~/.config/ceritadata/session.json`
/// - macOS: `~/Library/Application Support/ceritadata/session.json`
fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("ceritadata"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("session.json")
}

/// A [`SessionStore`] persisted to the config directory.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    token: Mutex<Option<String>>,
    login_required: AtomicBool,
}

impl FileSession {
    /// Loads the session from the default path. A missing or unreadable
    /// file means logged out.
    pub fn load() -> Self {
        Self::at_path(default_session_path())
    }

    /// Loads the session from an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        let token = read_token(&path);
        Self {
            path,
            token: Mutex::new(token),
            login_required: AtomicBool::new(false),
        }
    }

    /// The session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => write_token(&self.path, token),
            None => remove_file(&self.path),
        };
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
    }
}

impl SessionStore for FileSession {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        self.persist(token.as_deref());
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
// File Operations
// ============================================================================

fn read_token(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SessionFile>(&content) {
        Ok(file) => Some(file.token),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
            None
        }
    }
}

/// Writes the session file atomically (temp file + rename) with
/// owner-only permissions on Unix.
fn write_token(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
        set_restrictive_dir_permissions(parent)?;
    }

    let json = serde_json::to_string_pretty(&SessionFile {
        token: token.to_string(),
        saved_at: Utc::now(),
    })?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &json)?;
    std::fs::rename(&temp_path, path)?;
    set_restrictive_permissions(path)?;

    debug!(path = %path.display(), "Session saved");
    Ok(())
}

fn remove_file(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Sets owner read/write only (0o600) on Unix systems.
#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(path, perms)
}

/// Sets owner-only access (0o700) on Unix systems.
#[cfg(unix)]
fn set_restrictive_dir_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o700);
    std::fs::set_permissions(path, perms)
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
fn set_restrictive_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
fn set_restrictive_dir_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ceritadata").join("session.json");
        (dir, path)
    }

    #[test]
    fn token_round_trips_through_the_file() {
        let (_dir, path) = temp_session();

        let session = FileSession::at_path(path.clone());
        assert_eq!(session.token(), None);

        session.set_token(Some("tok-abc".to_string()));
        assert!(path.exists());

        let reloaded = FileSession::at_path(path);
        assert_eq!(reloaded.token(), Some("tok-abc".to_string()));
    }

    #[test]
    fn logout_removes_the_file() {
        let (_dir, path) = temp_session();

        let session = FileSession::at_path(path.clone());
        session.set_token(Some("tok".to_string()));
        session.set_token(None);

        assert!(!path.exists());
        assert_eq!(FileSession::at_path(path).token(), None);
    }

    #[test]
    fn corrupt_file_means_logged_out() {
        let (_dir, path) = temp_session();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(FileSession::at_path(path).token(), None);
    }

    #[test]
    fn login_clears_pending_redirect() {
        let (_dir, path) = temp_session();
        let session = FileSession::at_path(path);

        session.require_login();
        assert!(session.login_required());

        session.set_token(Some("tok".to_string()));
        assert!(!session.login_required());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, path) = temp_session();
        let session = FileSession::at_path(path.clone());
        session.set_token(Some("tok".to_string()));

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn no_stray_temp_file_after_save() {
        let (_dir, path) = temp_session();
        let session = FileSession::at_path(path.clone());
        session.set_token(Some("tok".to_string()));

        assert!(!path.with_extension("json.tmp").exists());
    }
}

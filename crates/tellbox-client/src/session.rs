// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client session state persisted between runs.
//!
//! Tracks which view is active and whether an admin session is held, stored
//! as JSON at a configurable path. Every mutation persists immediately, so
//! a restart lands where the user left off.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use tellbox_core::TellboxError;

use crate::auth::CredentialVerifier;

/// Which part of the UI is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// The public submission form.
    #[default]
    Feedback,
    /// The admin dashboard (login gate included).
    Admin,
}

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Opaque session token.
    pub token: String,
    /// Name the session was issued to.
    pub username: String,
    /// RFC 3339 issue timestamp.
    pub issued_at: String,
}

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    view: View,
    admin: Option<AdminSession>,
}

/// Client session state.
pub struct ClientSession {
    path: PathBuf,
    view: View,
    admin: Option<AdminSession>,
}

impl ClientSession {
    /// Loads the session from the given path.
    ///
    /// A missing file is the normal first run and yields the defaults; an
    /// unreadable file is ignored the same way. A stored admin session
    /// forces the admin view regardless of the stored view.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let stored = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<SessionFile>(&raw) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };

        match stored {
            Some(file) => {
                let view = if file.admin.is_some() {
                    View::Admin
                } else {
                    file.view
                };
                Self {
                    path,
                    view,
                    admin: file.admin,
                }
            }
            None => Self {
                path,
                view: View::Feedback,
                admin: None,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn admin(&self) -> Option<&AdminSession> {
        self.admin.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.admin.is_some()
    }

    /// Switches the active view.
    ///
    /// Navigating to the feedback view drops any admin session; returning
    /// to the admin view afterwards goes through the login gate again.
    pub fn navigate(&mut self, view: View) -> Result<(), TellboxError> {
        self.view = view;
        if view == View::Feedback {
            self.admin = None;
        }
        self.persist()
    }

    /// Verifies credentials and, on success, stores the issued session and
    /// switches to the admin view.
    pub async fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> Result<(), TellboxError> {
        let session = verifier.verify(username, password).await?;
        self.admin = Some(session);
        self.view = View::Admin;
        self.persist()
    }

    /// Drops the admin session and returns to the feedback view.
    pub fn logout(&mut self) -> Result<(), TellboxError> {
        self.admin = None;
        self.view = View::Feedback;
        self.persist()
    }

    fn persist(&self) -> Result<(), TellboxError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                TellboxError::Internal(format!(
                    "failed to create session directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let file = SessionFile {
            view: self.view,
            admin: self.admin.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| TellboxError::Internal(format!("failed to encode session: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| {
            TellboxError::Internal(format!(
                "failed to write session file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentialVerifier;

    fn session_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("session.json")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let session = ClientSession::load(session_path(&dir));
        assert_eq!(session.view(), View::Feedback);
        assert!(!session.is_admin());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        std::fs::write(&path, "{not json").unwrap();

        let session = ClientSession::load(&path);
        assert_eq!(session.view(), View::Feedback);
        assert!(!session.is_admin());
    }

    #[test]
    fn navigate_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);

        let mut session = ClientSession::load(&path);
        session.navigate(View::Admin).unwrap();

        let reloaded = ClientSession::load(&path);
        assert_eq!(reloaded.view(), View::Admin);
        assert!(!reloaded.is_admin(), "navigation alone grants nothing");
    }

    #[tokio::test]
    async fn login_stores_session_and_forces_admin_view_on_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        let verifier = StaticCredentialVerifier::new("admin", "admin123");

        let mut session = ClientSession::load(&path);
        session.login(&verifier, "admin", "admin123").await.unwrap();
        assert!(session.is_admin());
        assert_eq!(session.view(), View::Admin);

        let reloaded = ClientSession::load(&path);
        assert!(reloaded.is_admin());
        assert_eq!(reloaded.view(), View::Admin);
        assert_eq!(reloaded.admin().unwrap().username, "admin");
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        let verifier = StaticCredentialVerifier::new("admin", "admin123");

        let mut session = ClientSession::load(&path);
        let err = session
            .login(&verifier, "admin", "wrong")
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!session.is_admin());
        assert_eq!(session.view(), View::Feedback);
    }

    #[tokio::test]
    async fn navigating_to_feedback_drops_the_admin_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        let verifier = StaticCredentialVerifier::new("admin", "admin123");

        let mut session = ClientSession::load(&path);
        session.login(&verifier, "admin", "admin123").await.unwrap();

        session.navigate(View::Feedback).unwrap();
        assert!(!session.is_admin());

        let reloaded = ClientSession::load(&path);
        assert!(!reloaded.is_admin());
        assert_eq!(reloaded.view(), View::Feedback);
    }

    #[tokio::test]
    async fn logout_returns_to_the_feedback_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        let verifier = StaticCredentialVerifier::new("admin", "admin123");

        let mut session = ClientSession::load(&path);
        session.login(&verifier, "admin", "admin123").await.unwrap();
        session.logout().unwrap();

        assert!(!session.is_admin());
        assert_eq!(session.view(), View::Feedback);
    }

    #[test]
    fn persist_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("session.json");

        let mut session = ClientSession::load(&path);
        session.navigate(View::Admin).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn session_file_shape_is_stable() {
        let file = SessionFile {
            view: View::Admin,
            admin: Some(AdminSession {
                token: "tok".to_string(),
                username: "admin".to_string(),
                issued_at: "2026-01-05T15:04:00Z".to_string(),
            }),
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["view"], "admin");
        assert_eq!(json["admin"]["username"], "admin");
    }
}

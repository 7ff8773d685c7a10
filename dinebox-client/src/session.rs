//! Session storage - bearer token persisted as a JSON file

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::access::{Capabilities, derive_capabilities};
use shared::models::Profile;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ClientResult;

/// What survives a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: Utc::now(),
        }
    }
}

/// Session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored session
    ///
    /// A missing, unreadable or corrupt file, or one holding a blank token,
    /// reads as "no session".
    pub fn load(&self) -> Option<StoredSession> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredSession>(&json) {
            Ok(session) if !session.token.trim().is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Signed-in viewer: token plus the profile once fetched
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    profile: Option<Profile>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            profile: None,
        }
    }

    /// An explicit token wins over the stored one
    pub fn resolve(explicit: Option<String>, store: &SessionStore) -> Self {
        let explicit = explicit.filter(|t| !t.trim().is_empty());
        Self::new(explicit.or_else(|| store.load().map(|s| s.token)))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    /// Capabilities of the viewer; none until a profile is loaded
    pub fn capabilities(&self) -> Capabilities {
        self.profile
            .as_ref()
            .map(|p| derive_capabilities(&p.roles))
            .unwrap_or_default()
    }
}

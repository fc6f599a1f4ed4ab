//! The user profile: who is logged in and which to-do repos are known.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::util::fs::{atomic_write, PUBLIC_FILE_MODE};

/// Persisted profile, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub to_do_repos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_repo: Option<String>,
}

impl UserProfile {
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }
}

/// Storage abstraction for the user profile.
pub trait ProfileStore: Send + Sync {
    /// Returns an empty profile when none has been saved yet.
    fn load(&self) -> Result<UserProfile>;
    fn save(&self, profile: &UserProfile) -> Result<()>;
}

/// Profile kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<UserProfile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "profile not found, using empty profile");
                return Ok(UserProfile::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(profile)?;
        atomic_write(&self.path, &serialized, PUBLIC_FILE_MODE)?;
        info!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}

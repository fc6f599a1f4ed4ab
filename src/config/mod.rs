//! Configuration (layered: code > env > defaults) and the user profile.

pub mod profile;

pub use profile::{FileProfileStore, ProfileStore, UserProfile};

use std::path::PathBuf;

use crate::auth::github::{DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_GITHUB_URL};
use crate::auth::store::TOKEN_FILE_NAME;

/// Directory name under the user's home that holds ggi state.
pub const HOME_DIR_NAME: &str = ".go-git-it";
pub const PROFILE_FILE_NAME: &str = "profile.json";

pub const HOME_ENV: &str = "GGI_HOME";
pub const GITHUB_URL_ENV: &str = "GGI_GITHUB_URL";
pub const API_URL_ENV: &str = "GGI_GITHUB_API_URL";

/// Process-wide settings, built once at startup and passed down explicitly.
///
/// # Example
/// ```
/// use ggi::config::GgiConfig;
///
/// let config = GgiConfig::new("/tmp/ggi".into()).with_github_url("http://localhost:8080");
/// assert_eq!(config.token_path(), std::path::PathBuf::from("/tmp/ggi/.token"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GgiConfig {
    pub home_dir: PathBuf,
    pub github_url: String,
    pub api_url: String,
    pub client_id: String,
}

impl Default for GgiConfig {
    fn default() -> Self {
        Self::new(Self::default_home_dir())
    }
}

impl GgiConfig {
    pub fn new(home_dir: PathBuf) -> Self {
        Self {
            home_dir,
            github_url: DEFAULT_GITHUB_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }

    /// `~/.go-git-it`, or `./.go-git-it` when no home directory is known.
    pub fn default_home_dir() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(HOME_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(HOME_DIR_NAME))
    }

    /// Load from environment variables (after reading `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let home_dir = non_empty(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_home_dir);
        let mut config = Self::new(home_dir);
        if let Some(url) = non_empty(GITHUB_URL_ENV) {
            config.github_url = url;
        }
        if let Some(url) = non_empty(API_URL_ENV) {
            config.api_url = url;
        }
        config
    }

    pub fn with_github_url(mut self, url: impl Into<String>) -> Self {
        self.github_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn token_path(&self) -> PathBuf {
        self.home_dir.join(TOKEN_FILE_NAME)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.home_dir.join(PROFILE_FILE_NAME)
    }
}

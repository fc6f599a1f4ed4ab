use std::sync::Arc;

use tracing::info;

use super::device_code::UserCodePrompt;
use super::github::GitHubDeviceAuth;
use super::poller::{Sleeper, TokenPoller, TokioSleeper};
use super::store::{CredentialStore, FileCredentialStore};
use crate::config::{FileProfileStore, GgiConfig, ProfileStore, UserProfile};
use crate::error::Result;

/// Result of a completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSummary {
    /// GitHub login name of the account that authorized ggi.
    pub login: String,
}

/// Snapshot for `ggi info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    pub logged_in: bool,
    pub profile: UserProfile,
}

/// Pure service facade for the login flow and credential-backed lookups.
///
/// All I/O decisions (printing, prompting, exit codes) belong to the caller.
/// Stores, the GitHub client and the sleeper are injected at construction.
///
/// # Example
/// ```no_run
/// use ggi::auth::AuthService;
/// use ggi::config::GgiConfig;
///
/// # async fn run() -> ggi::error::Result<()> {
/// let service = AuthService::from_config(&GgiConfig::from_env());
/// let summary = service
///     .login(|prompt| {
///         println!("Visit {} and enter {}", prompt.verification_uri, prompt.user_code)
///     })
///     .await?;
/// println!("Logged in as {}", summary.login);
/// # Ok(())
/// # }
/// ```
pub struct AuthService {
    auth: GitHubDeviceAuth,
    credentials: Arc<dyn CredentialStore>,
    profiles: Arc<dyn ProfileStore>,
    sleeper: Arc<dyn Sleeper>,
}

impl AuthService {
    pub fn new(
        auth: GitHubDeviceAuth,
        credentials: Arc<dyn CredentialStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            auth,
            credentials,
            profiles,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// File-backed stores under `config.home_dir` and endpoints from `config`.
    pub fn from_config(config: &GgiConfig) -> Self {
        Self::new(
            GitHubDeviceAuth::from_config(config),
            Arc::new(FileCredentialStore::new(config.token_path())),
            Arc::new(FileProfileStore::new(config.profile_path())),
        )
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run the device flow end to end.
    ///
    /// `present` is called once with the code the user must enter. On success
    /// the token replaces any stored credential and the account's login name
    /// is written to the profile. On failure the credential store is left
    /// untouched and nothing is retried.
    pub async fn login<F>(&self, present: F) -> Result<LoginSummary>
    where
        F: FnOnce(&UserCodePrompt),
    {
        let session = self.auth.request_device_code().await?;
        present(&session.prompt());

        let credential = TokenPoller::new(&self.auth, self.sleeper.as_ref())
            .poll(&session)
            .await?;
        drop(session);

        self.credentials.write(&credential)?;
        let login = self.auth.fetch_login(&credential).await?;

        let mut profile = self.profiles.load()?;
        profile.set_username(login.clone());
        self.profiles.save(&profile)?;

        info!(login = %login, "login complete");
        Ok(LoginSummary { login })
    }

    /// Login name for the stored credential.
    pub async fn whoami(&self) -> Result<String> {
        let credential = self.credentials.read()?;
        Ok(self.auth.fetch_login(&credential).await?)
    }

    pub fn status(&self) -> Result<AuthStatus> {
        Ok(AuthStatus {
            logged_in: self.credentials.exists()?,
            profile: self.profiles.load()?,
        })
    }

    /// Remove the stored credential. Succeeds when already logged out.
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear()?;
        Ok(())
    }
}

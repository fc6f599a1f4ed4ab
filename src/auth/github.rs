use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::device_code::{
    classify_token_response, parse_device_code_response, AuthorizationSession, PollOutcome,
};
use super::error::AuthError;
use super::token::Credential;
use crate::config::GgiConfig;

/// OAuth app client id registered for ggi.
pub const DEFAULT_CLIENT_ID: &str = "Iv1.c83e19acec653315";
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DEVICE_CODE_PATH: &str = "/login/device/code";
const ACCESS_TOKEN_PATH: &str = "/login/oauth/access_token";
const USER_PATH: &str = "/user";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const GITHUB_JSON: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("ggi/", env!("CARGO_PKG_VERSION"));

/// HTTP side of the GitHub device flow plus the identity lookup.
///
/// # Example
/// ```no_run
/// use ggi::auth::GitHubDeviceAuth;
///
/// # async fn run() -> Result<(), ggi::auth::AuthError> {
/// let auth = GitHubDeviceAuth::new();
/// let session = auth.request_device_code().await?;
/// println!("Visit {} and enter {}", session.verification_uri(), session.user_code());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubDeviceAuth {
    client: reqwest::Client,
    client_id: String,
    device_code_url: String,
    access_token_url: String,
    user_url: String,
}

impl Default for GitHubDeviceAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubDeviceAuth {
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_GITHUB_URL, DEFAULT_API_URL)
    }

    pub fn from_config(config: &GgiConfig) -> Self {
        Self::with_base_urls(&config.github_url, &config.api_url)
            .with_client_id(config.client_id.clone())
    }

    /// Derive all endpoints from the web and API roots.
    pub fn with_base_urls(github_url: &str, api_url: &str) -> Self {
        let github_url = github_url.trim_end_matches('/');
        let api_url = api_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            device_code_url: format!("{github_url}{DEVICE_CODE_PATH}"),
            access_token_url: format!("{github_url}{ACCESS_TOKEN_PATH}"),
            user_url: format!("{api_url}{USER_PATH}"),
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Ask GitHub for a device code. Unscoped: no `scope` is sent.
    pub async fn request_device_code(&self) -> Result<AuthorizationSession, AuthError> {
        let resp = self
            .client
            .post(&self.device_code_url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .form(&[("client_id", self.client_id.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(AuthError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let session = parse_device_code_response(&body)?;
        debug!(
            user_code = session.user_code(),
            interval_secs = session.poll_interval().as_secs(),
            "device code issued"
        );
        Ok(session)
    }

    /// One token-exchange attempt for `session`.
    pub async fn exchange_device_code(
        &self,
        session: &AuthorizationSession,
    ) -> Result<PollOutcome, AuthError> {
        let resp = self
            .client
            .post(&self.access_token_url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("device_code", session.device_code()),
                ("grant_type", DEVICE_GRANT_TYPE),
            ])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        classify_token_response(status, &body)
    }

    /// Login name of the account `credential` belongs to.
    pub async fn fetch_login(&self, credential: &Credential) -> Result<String, AuthError> {
        let resp = self
            .client
            .get(&self.user_url)
            .header(ACCEPT, GITHUB_JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(AUTHORIZATION, credential.bearer_header())
            .send()
            .await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::Unauthorized);
        }
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(AuthError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let user: GitHubUser = serde_json::from_str(&body)
            .map_err(|_| AuthError::Protocol("malformed user response".to_string()))?;
        Ok(user.login)
    }
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

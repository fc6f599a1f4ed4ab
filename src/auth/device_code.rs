use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum::{Display, EnumString};

use super::error::AuthError;
use super::token::Credential;

/// Lifetime assumed when the server omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 900;

/// One device-flow login attempt, as issued by the device-code endpoint.
///
/// Immutable once created. The device code never leaves this struct except
/// in the token-exchange request body; `Debug` redacts it.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use ggi::auth::AuthorizationSession;
///
/// let session = AuthorizationSession::new(
///     "device-code",
///     "ABCD-1234",
///     "https://github.com/login/device",
///     5,
///     Utc::now(),
/// );
/// assert_eq!(session.poll_interval().as_secs(), 5);
/// assert!(!format!("{session:?}").contains("device-code"));
/// ```
pub struct AuthorizationSession {
    device_code: String,
    user_code: String,
    verification_uri: String,
    poll_interval: Duration,
    expires_at: DateTime<Utc>,
}

impl AuthorizationSession {
    pub fn new(
        device_code: impl Into<String>,
        user_code: impl Into<String>,
        verification_uri: impl Into<String>,
        interval_secs: u64,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            device_code: device_code.into(),
            user_code: user_code.into(),
            verification_uri: verification_uri.into(),
            // A zero interval would turn the poll loop into a busy loop.
            poll_interval: Duration::from_secs(interval_secs.max(1)),
            expires_at,
        }
    }

    pub(crate) fn device_code(&self) -> &str {
        &self.device_code
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn verification_uri(&self) -> &str {
        &self.verification_uri
    }

    /// Interval the server asked for; the poller may only grow it.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Informational only. Expiry is enforced by the server's `expired_token`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn prompt(&self) -> UserCodePrompt {
        UserCodePrompt {
            verification_uri: self.verification_uri.clone(),
            user_code: self.user_code.clone(),
        }
    }
}

impl fmt::Debug for AuthorizationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationSession")
            .field("device_code", &"[REDACTED]")
            .field("user_code", &self.user_code)
            .field("verification_uri", &self.verification_uri)
            .field("poll_interval", &self.poll_interval)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the user has to do to approve the login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCodePrompt {
    pub verification_uri: String,
    pub user_code: String,
}

/// Classification of a single token-exchange response.
#[derive(Debug)]
pub enum PollOutcome {
    Pending,
    SlowDown,
    Success(Credential),
    Expired,
    Denied,
    UnexpectedError(String),
}

/// Documented `error` values of the device-flow token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceFlowErrorCode {
    AuthorizationPending,
    SlowDown,
    ExpiredToken,
    AccessDenied,
}

impl From<DeviceFlowErrorCode> for PollOutcome {
    fn from(code: DeviceFlowErrorCode) -> Self {
        match code {
            DeviceFlowErrorCode::AuthorizationPending => PollOutcome::Pending,
            DeviceFlowErrorCode::SlowDown => PollOutcome::SlowDown,
            DeviceFlowErrorCode::ExpiredToken => PollOutcome::Expired,
            DeviceFlowErrorCode::AccessDenied => PollOutcome::Denied,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    interval: f64,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
    error: Option<String>,
}

/// Build a session from a 2xx device-code response body.
pub fn parse_device_code_response(body: &str) -> Result<AuthorizationSession, AuthError> {
    let payload: DeviceCodeResponse = serde_json::from_str(body)
        .map_err(|_| AuthError::Protocol("malformed device-code response".to_string()))?;
    if !payload.interval.is_finite() || payload.interval < 0.0 {
        return Err(AuthError::Protocol(
            "malformed device-code response".to_string(),
        ));
    }
    let expires_at = expiry_from(payload.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS));
    Ok(AuthorizationSession::new(
        payload.device_code,
        payload.user_code,
        payload.verification_uri,
        // Fractional seconds are truncated.
        payload.interval as u64,
        expires_at,
    ))
}

/// `now + expires_in`, or the default lifetime when that is out of range.
fn expiry_from(expires_in: u64) -> DateTime<Utc> {
    let now = Utc::now();
    i64::try_from(expires_in)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + chrono::Duration::seconds(DEFAULT_EXPIRES_IN_SECS as i64))
}

/// Classify a token-exchange response.
///
/// Documented error codes are honoured regardless of status. Anything else on
/// a 2xx becomes [`PollOutcome::UnexpectedError`] with the raw body; anything
/// else on a non-2xx is [`AuthError::Server`].
pub fn classify_token_response(status: u16, body: &str) -> Result<PollOutcome, AuthError> {
    let success = (200..300).contains(&status);
    let server_error = || AuthError::Server {
        status,
        body: body.to_string(),
    };
    match serde_json::from_str::<TokenExchangeResponse>(body) {
        Ok(TokenExchangeResponse {
            access_token: Some(token),
            ..
        }) if success && !token.is_empty() => Ok(PollOutcome::Success(Credential::new(token))),
        Ok(TokenExchangeResponse {
            error: Some(code), ..
        }) => match code.parse::<DeviceFlowErrorCode>() {
            Ok(code) => Ok(code.into()),
            Err(_) if success => Ok(PollOutcome::UnexpectedError(body.to_string())),
            Err(_) => Err(server_error()),
        },
        _ if success => Ok(PollOutcome::UnexpectedError(body.to_string())),
        _ => Err(server_error()),
    }
}

use thiserror::Error;

/// Failures of the device-flow login and of credential access.
///
/// Each variant's `Display` text is the message shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("You are not logged in. Run `ggi login` first.")]
    NotLoggedIn,
    #[error("GitHub rejected the stored credential. Run `ggi login` again.")]
    Unauthorized,
    #[error("The device code has expired. Please run `ggi login` again.")]
    Expired,
    #[error("Login cancelled by user.")]
    Denied,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("GitHub returned status {status}: {body}")]
    Server { status: u16, body: String },
    #[error("Unexpected response from GitHub: {0}")]
    Unexpected(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl AuthError {
    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotLoggedIn => "not_logged_in",
            Self::Unauthorized => "unauthorized",
            Self::Expired => "expired",
            Self::Denied => "denied",
            Self::Network(_) => "network",
            Self::Protocol(_) => "malformed",
            Self::Server { .. } => "server",
            Self::Unexpected(_) => "unexpected",
            Self::Io(_) => "io",
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

use std::fmt;

use secrecy::{ExposeSecret, Secret};

/// Bearer token obtained from a successful device-flow exchange.
///
/// # Example
/// ```
/// use ggi::auth::Credential;
///
/// let credential = Credential::new("gho_example");
/// assert_eq!(credential.expose(), "gho_example");
/// assert!(!format!("{credential:?}").contains("gho_example"));
/// ```
pub struct Credential {
    bearer_token: Secret<String>,
}

impl Credential {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: Secret::new(bearer_token.into()),
        }
    }

    /// Raw token string, for `Authorization` headers and persistence.
    pub fn expose(&self) -> &str {
        self.bearer_token.expose_secret()
    }

    /// Value for an `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("bearer_token", &"[REDACTED]")
            .finish()
    }
}

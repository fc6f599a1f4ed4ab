//! GitHub OAuth device-flow login and credential storage.

pub mod device_code;
pub mod error;
pub mod github;
pub mod poller;
pub mod service;
pub mod store;
pub mod token;

pub use device_code::{AuthorizationSession, DeviceFlowErrorCode, PollOutcome, UserCodePrompt};
pub use error::AuthError;
pub use github::GitHubDeviceAuth;
pub use poller::{PollState, PollStep, Sleeper, TokenPoller, TokioSleeper, SLOW_DOWN_INCREMENT};
pub use service::{AuthService, AuthStatus, LoginSummary};
pub use store::{CredentialStore, FileCredentialStore};
pub use token::Credential;

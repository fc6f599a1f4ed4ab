//! Token polling state machine for the device flow.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::device_code::{AuthorizationSession, PollOutcome};
use super::error::AuthError;
use super::github::GitHubDeviceAuth;
use super::token::Credential;

/// Added to the effective interval on every `slow_down`. Uncapped.
pub const SLOW_DOWN_INCREMENT: Duration = Duration::from_secs(5);

/// Pause between poll attempts. Injected so tests can observe the pacing.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// What the poll loop does after an outcome has been classified.
#[derive(Debug)]
pub enum PollStep {
    /// Non-terminal: wait this long, then poll again.
    Wait(Duration),
    Authorized(Credential),
    Failed(AuthError),
}

/// Polling state for one [`AuthorizationSession`].
///
/// The effective interval starts at the server's interval and only ever grows.
#[derive(Debug, Clone)]
pub struct PollState {
    interval: Duration,
    attempts: u32,
}

impl PollState {
    pub fn new(initial_interval: Duration) -> Self {
        Self {
            interval: initial_interval,
            attempts: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of outcomes consumed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn advance(&mut self, outcome: PollOutcome) -> PollStep {
        self.attempts = self.attempts.saturating_add(1);
        match outcome {
            PollOutcome::Pending => {
                debug!(
                    attempt = self.attempts,
                    interval_secs = self.interval.as_secs(),
                    "authorization pending"
                );
                PollStep::Wait(self.interval)
            }
            PollOutcome::SlowDown => {
                self.interval = self.interval.saturating_add(SLOW_DOWN_INCREMENT);
                warn!(
                    attempt = self.attempts,
                    interval_secs = self.interval.as_secs(),
                    "server asked to slow down"
                );
                PollStep::Wait(self.interval)
            }
            PollOutcome::Success(credential) => PollStep::Authorized(credential),
            PollOutcome::Expired => PollStep::Failed(AuthError::Expired),
            PollOutcome::Denied => PollStep::Failed(AuthError::Denied),
            PollOutcome::UnexpectedError(raw) => PollStep::Failed(AuthError::Unexpected(raw)),
        }
    }
}

/// Drives token exchanges until a terminal outcome.
///
/// The first exchange is sent immediately; every later one is preceded by
/// exactly one sleep of the effective interval. Transport failures end the
/// loop.
pub struct TokenPoller<'a> {
    auth: &'a GitHubDeviceAuth,
    sleeper: &'a dyn Sleeper,
}

impl<'a> TokenPoller<'a> {
    pub fn new(auth: &'a GitHubDeviceAuth, sleeper: &'a dyn Sleeper) -> Self {
        Self { auth, sleeper }
    }

    pub async fn poll(&self, session: &AuthorizationSession) -> Result<Credential, AuthError> {
        let mut state = PollState::new(session.poll_interval());
        loop {
            let outcome = self.auth.exchange_device_code(session).await?;
            match state.advance(outcome) {
                PollStep::Wait(interval) => self.sleeper.sleep(interval).await,
                PollStep::Authorized(credential) => {
                    debug!(attempts = state.attempts(), "device authorized");
                    return Ok(credential);
                }
                PollStep::Failed(err) => {
                    debug!(attempts = state.attempts(), kind = err.kind(), "polling stopped");
                    return Err(err);
                }
            }
        }
    }
}

//! ggi (Go-Git-It)
//!
//! A to-do list on top of Git and GitHub. This crate holds the pieces that
//! authenticate ggi against GitHub: the OAuth device-flow login, the stored
//! bearer credential, and the user profile that records who logged in.
//!
//! # Quick Start
//!
//! ```no_run
//! use ggi::auth::AuthService;
//! use ggi::config::GgiConfig;
//!
//! # async fn example() -> ggi::error::Result<()> {
//! let service = AuthService::from_config(&GgiConfig::from_env());
//! println!("{}", service.whoami().await?);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;

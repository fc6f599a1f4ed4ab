use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::error::AuthError;
use super::token::Credential;
use crate::util::fs::{atomic_write, PRIVATE_FILE_MODE};

/// File name of the persisted token inside the ggi home directory.
pub const TOKEN_FILE_NAME: &str = ".token";

/// Storage for the single bearer token ggi acts with.
pub trait CredentialStore: Send + Sync {
    fn exists(&self) -> Result<bool, AuthError>;
    /// Fails with [`AuthError::NotLoggedIn`] when nothing is stored.
    fn read(&self) -> Result<Credential, AuthError>;
    /// Replaces any previously stored credential.
    fn write(&self, credential: &Credential) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Token kept as raw bytes in a single owner-only file.
///
/// # Example
/// ```no_run
/// use ggi::auth::{Credential, CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::new(std::path::PathBuf::from("/tmp/ggi/.token"));
/// store.write(&Credential::new("gho_example"))?;
/// assert_eq!(store.read()?.expose(), "gho_example");
/// # Ok::<(), ggi::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<home_dir>/.token`.
    pub fn in_dir(home_dir: impl Into<PathBuf>) -> Self {
        Self::new(home_dir.into().join(TOKEN_FILE_NAME))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn exists(&self) -> Result<bool, AuthError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }

    fn read(&self) -> Result<Credential, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "credential file not found");
                return Err(AuthError::NotLoggedIn);
            }
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        if raw.is_empty() {
            return Err(AuthError::NotLoggedIn);
        }
        Ok(Credential::new(raw))
    }

    fn write(&self, credential: &Credential) -> Result<(), AuthError> {
        atomic_write(
            &self.path,
            credential.expose().as_bytes(),
            PRIVATE_FILE_MODE,
        )?;
        info!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "credential removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

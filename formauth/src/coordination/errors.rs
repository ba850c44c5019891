//! Error types for the coordination layer

use thiserror::Error;

use crate::password::PasswordError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::userdb::UserError;

/// Errors that can occur while coordinating an authentication flow
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Submitted form data failed validation
    #[error("{0}")]
    Validation(String),

    /// Username or email already taken
    #[error("Username or email is already registered")]
    Conflict,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from the user database operations
    #[error("User error: {0}")]
    User(UserError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// Client mistakes are logged at debug level, everything else as an error.
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(msg) => tracing::debug!("Validation failed: {}", msg),
            Self::Conflict => tracing::debug!("Conflict: username or email already registered"),
            Self::InvalidCredentials => tracing::debug!("Invalid credentials"),
            Self::Storage(err) => tracing::error!("Storage error: {}", err),
            Self::User(err) => tracing::error!("User error: {}", err),
            Self::Password(err) => tracing::error!("Password error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
        }
        self
    }

    /// True for errors caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Conflict | Self::InvalidCredentials
        )
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Duplicate => Self::Conflict,
            UserError::InvalidData(msg) => Self::Validation(msg),
            other => Self::User(other),
        }
    }
}

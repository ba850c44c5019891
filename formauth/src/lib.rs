//! formauth - username/password authentication with server-side sessions
//!
//! This crate holds everything that does not depend on a web framework:
//! configuration, the user table, password hashing, signed session cookies and
//! the coordination functions that tie them together. The `formauth-axum`
//! crate exposes it over HTTP.

mod config;
mod context;
mod coordination;
mod password;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{AuthConfig, CacheStoreType, ConfigError, DataStoreType};
pub use context::AuthContext;

pub use coordination::{
    CoordinationError, LoginForm, RegistrationForm, get_session_user, login_core, logout_core,
    register_user_core,
};

pub use password::PasswordError;

pub use session::{
    CacheSessionBackend, FLASH_COOKIE_NAME, Flash, FlashLevel, SessionBackend, SessionError,
    SessionManager,
};

pub use storage::StorageError;

pub use userdb::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN, User, UserError, UserId, UserStore};

pub use utils::UtilError;

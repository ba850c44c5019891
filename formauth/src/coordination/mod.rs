//! Authentication coordination
//!
//! High-level entry points that combine the user store, the password hasher and
//! the session manager. Web handlers call these and translate the outcome into
//! HTTP responses.

mod auth;
mod errors;
mod forms;

pub use auth::{get_session_user, login_core, logout_core, register_user_core};
pub use errors::CoordinationError;
pub use forms::{LoginForm, RegistrationForm};

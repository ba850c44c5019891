//! Axum integration for formauth
//!
//! [`formauth_router`] serves the registration, login, dashboard, home and
//! logout pages on top of a shared [`formauth::AuthContext`].

mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;

#[cfg(test)]
mod test_utils;

pub use config::{
    DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, LOGOUT_PATH, REDIRECT_ANON, REDIRECT_USER,
    REGISTER_PATH, ROOT_PATH,
};
pub use middleware::require_session;
pub use router::{formauth_router, formauth_router_no_trace};
pub use session::{AuthRejection, AuthUser};

// Re-export the core crate so applications need only one dependency
pub use formauth::{AuthConfig, AuthContext, ConfigError, CoordinationError};

//! Route paths served by [`crate::formauth_router`]

pub const ROOT_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const HOME_PATH: &str = "/home";

/// Where anonymous visitors of protected pages are sent
pub const REDIRECT_ANON: &str = LOGIN_PATH;

/// Where a successful login lands
pub const REDIRECT_USER: &str = DASHBOARD_PATH;

use askama::Template;
use axum::response::Html;
use http::StatusCode;

use crate::config::{DASHBOARD_PATH, LOGOUT_PATH};
use crate::session::AuthUser;

use super::render;

#[derive(Template)]
#[template(path = "home.j2", escape = "html")]
struct HomeTemplate<'a> {
    username: &'a str,
    dashboard_path: &'a str,
    logout_path: &'a str,
}

pub(crate) async fn home(user: AuthUser) -> Result<Html<String>, (StatusCode, String)> {
    render(&HomeTemplate {
        username: &user.username,
        dashboard_path: DASHBOARD_PATH,
        logout_path: LOGOUT_PATH,
    })
}

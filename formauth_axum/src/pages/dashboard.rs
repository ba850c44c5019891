use askama::Template;
use axum::response::Html;
use http::StatusCode;

use crate::config::{HOME_PATH, LOGOUT_PATH};
use crate::session::AuthUser;

use super::render;

#[derive(Template)]
#[template(path = "dashboard.j2", escape = "html")]
struct DashboardTemplate<'a> {
    username: &'a str,
    home_path: &'a str,
    logout_path: &'a str,
}

pub(crate) async fn dashboard(user: AuthUser) -> Result<Html<String>, (StatusCode, String)> {
    render(&DashboardTemplate {
        username: &user.username,
        home_path: HOME_PATH,
        logout_path: LOGOUT_PATH,
    })
}

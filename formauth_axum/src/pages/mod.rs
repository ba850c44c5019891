mod dashboard;
mod home;
mod index;
mod login;
mod logout;
mod register;

use askama::Template;
use axum::response::Html;
use http::StatusCode;

use crate::error::IntoResponseError;

pub(crate) use dashboard::dashboard;
pub(crate) use home::home;
pub(crate) use index::index;
pub(crate) use login::{login, login_form};
pub(crate) use logout::logout;
pub(crate) use register::{register, register_form};

fn render(template: &impl Template) -> Result<Html<String>, (StatusCode, String)> {
    template.render().into_response_error().map(Html)
}

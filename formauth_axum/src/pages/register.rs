use std::sync::Arc;

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, StatusCode};

use formauth::{AuthContext, Flash, RegistrationForm, register_user_core};

use crate::config::{LOGIN_PATH, REGISTER_PATH};
use crate::error::{IntoResponseError, status_for};

use super::render;

#[derive(Template)]
#[template(path = "register.j2", escape = "html")]
struct RegisterTemplate<'a> {
    flash: Option<Flash>,
    username: &'a str,
    email: &'a str,
    register_path: &'a str,
    login_path: &'a str,
}

impl<'a> RegisterTemplate<'a> {
    fn new(flash: Option<Flash>, username: &'a str, email: &'a str) -> Self {
        Self {
            flash,
            username,
            email,
            register_path: REGISTER_PATH,
            login_path: LOGIN_PATH,
        }
    }
}

/// GET: the empty registration form
pub(crate) async fn register_form(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let (flash, clear_flash) = ctx.sessions().take_flash(&headers).into_response_error()?;
    let html = render(&RegisterTemplate::new(flash, "", ""))?;
    Ok((clear_flash, html).into_response())
}

/// POST: create the account and continue to the login page
pub(crate) async fn register(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, (StatusCode, String)> {
    let username = form.username.trim().to_string();
    let email = form.email.trim().to_string();

    match register_user_core(&ctx, form).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Registration complete, redirecting to login");
            let mut response_headers = HeaderMap::new();
            ctx.sessions()
                .set_flash(&mut response_headers, &Flash::success("Registration successful!"))
                .into_response_error()?;
            Ok((response_headers, Redirect::to(LOGIN_PATH)).into_response())
        }
        Err(e) if e.is_client_error() => {
            let status = status_for(&e);
            let (_, clear_flash) = ctx.sessions().take_flash(&headers).into_response_error()?;
            let flash = Flash::danger(e.to_string());
            let html = render(&RegisterTemplate::new(Some(flash), &username, &email))?;
            Ok((status, clear_flash, html).into_response())
        }
        Err(e) => {
            let e = e.log();
            Err((status_for(&e), e.to_string()))
        }
    }
}

use std::sync::Arc;

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, StatusCode};

use formauth::{AuthContext, CoordinationError, Flash, LoginForm, login_core};

use crate::config::{LOGIN_PATH, REDIRECT_USER, REGISTER_PATH};
use crate::error::{IntoResponseError, status_for};

use super::render;

#[derive(Template)]
#[template(path = "login.j2", escape = "html")]
struct LoginTemplate<'a> {
    flash: Option<Flash>,
    email: &'a str,
    login_path: &'a str,
    register_path: &'a str,
}

impl<'a> LoginTemplate<'a> {
    fn new(flash: Option<Flash>, email: &'a str) -> Self {
        Self {
            flash,
            email,
            login_path: LOGIN_PATH,
            register_path: REGISTER_PATH,
        }
    }
}

/// GET: the login form, showing any pending flash message
pub(crate) async fn login_form(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let (flash, clear_flash) = ctx.sessions().take_flash(&headers).into_response_error()?;
    let html = render(&LoginTemplate::new(flash, ""))?;
    Ok((clear_flash, html).into_response())
}

/// POST: check credentials and start a session
///
/// Unknown email and wrong password produce the same page with the same status.
/// A re-rendered form shows only the error, so any pending flash is cleared.
pub(crate) async fn login(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, (StatusCode, String)> {
    let email = form.email.trim().to_string();

    match login_core(&ctx, form).await {
        Ok((user, session_headers)) => {
            tracing::debug!(user_id = %user.id, "Redirecting to {}", REDIRECT_USER);
            Ok((session_headers, Redirect::to(REDIRECT_USER)).into_response())
        }
        Err(e) if e.is_client_error() => {
            let status = match e {
                CoordinationError::InvalidCredentials => StatusCode::OK,
                _ => status_for(&e),
            };
            let (_, clear_flash) = ctx.sessions().take_flash(&headers).into_response_error()?;
            let flash = Flash::danger(e.to_string());
            let html = render(&LoginTemplate::new(Some(flash), &email))?;
            Ok((status, clear_flash, html).into_response())
        }
        Err(e) => {
            let e = e.log();
            Err((status_for(&e), e.to_string()))
        }
    }
}

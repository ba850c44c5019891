use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, StatusCode};

use formauth::{AuthContext, Flash, logout_core};

use crate::config::LOGIN_PATH;
use crate::error::IntoResponseError;

/// End the session and return to the login page
pub(crate) async fn logout(
    State(ctx): State<Arc<AuthContext>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let mut response_headers = logout_core(&ctx, &headers).await.into_response_error()?;
    ctx.sessions()
        .set_flash(&mut response_headers, &Flash::info("You have been logged out."))
        .into_response_error()?;

    tracing::debug!("Redirecting to {}", LOGIN_PATH);
    Ok((response_headers, Redirect::to(LOGIN_PATH)).into_response())
}

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use formauth::AuthContext;

use super::session::{AuthRejection, AuthUser};

/// Session gate for protected routes
///
/// Apply with `axum::middleware::from_fn_with_state` as a `route_layer`.
/// Anonymous requests are redirected to the login page without reaching the
/// handler. Otherwise the logged in [`AuthUser`] is stored in the request
/// extensions for the handler to extract.
pub async fn require_session(
    State(ctx): State<Arc<AuthContext>>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    match AuthUser::resolve(&ctx, &parts).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, "Session verified");
            parts.extensions.insert(user);
            next.run(http::Request::from_parts(parts, body)).await
        }
        Ok(None) => {
            tracing::debug!(path = %parts.uri.path(), "Anonymous request to protected route");
            AuthRejection::Anonymous.into_response()
        }
        Err(rejection) => rejection.into_response(),
    }
}

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use http::{StatusCode, request::Parts};

use formauth::{AuthContext, User, UserId, get_session_user};

use super::config::REDIRECT_ANON;

/// Why a request could not be resolved to a logged in user
#[derive(Debug)]
pub enum AuthRejection {
    /// No valid session. Answered with a redirect to the login page.
    Anonymous,
    /// The session could not be checked
    Internal(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Anonymous => {
                tracing::debug!("Redirecting to {}", REDIRECT_ANON);
                Redirect::to(REDIRECT_ANON).into_response()
            }
            Self::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Authenticated user information, available as an Axum extractor
///
/// Handlers behind [`crate::require_session`] find it in the request
/// extensions. Elsewhere the extractor resolves the session cookie itself and
/// redirects anonymous requests to the login page.
///
/// # Example
///
/// ```no_run
/// use formauth_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl AuthUser {
    pub(crate) async fn resolve(
        ctx: &AuthContext,
        parts: &Parts,
    ) -> Result<Option<Self>, AuthRejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(Some(user.clone()));
        }

        let user = get_session_user(ctx, &parts.headers).await.map_err(|e| {
            let e = e.log();
            AuthRejection::Internal(e.to_string())
        })?;
        Ok(user.map(AuthUser::from))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = Arc::<AuthContext>::from_ref(state);
        Self::resolve(&ctx, parts)
            .await?
            .ok_or(AuthRejection::Anonymous)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    Arc<AuthContext>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let ctx = Arc::<AuthContext>::from_ref(state);
        Self::resolve(&ctx, parts).await
    }
}

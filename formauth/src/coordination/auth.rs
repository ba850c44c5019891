use http::HeaderMap;

use crate::context::AuthContext;
use crate::password::{hash_password, verify_password};
use crate::userdb::{NewUser, User, UserSearchField};

use super::errors::CoordinationError;
use super::forms::{LoginForm, RegistrationForm};

/// Create a user from a submitted registration form
///
/// Uniqueness of the username and email is left to the database, so two
/// concurrent registrations for the same email yield exactly one user and one
/// [`CoordinationError::Conflict`].
#[tracing::instrument(skip_all)]
pub async fn register_user_core(
    ctx: &AuthContext,
    form: RegistrationForm,
) -> Result<User, CoordinationError> {
    let form = form.normalize().map_err(CoordinationError::log)?;

    let password_hash = hash_password(ctx.hasher.clone(), form.password).await?;

    let user = ctx
        .users
        .create_user(NewUser {
            username: form.username,
            email: form.email,
            password_hash,
        })
        .await
        .map_err(|e| CoordinationError::from(e).log())?;

    tracing::info!(user_id = %user.id, "Registered new user");
    Ok(user)
}

/// Check credentials and start a session
///
/// Returns the user and the headers that set the session cookie. Unknown
/// emails and wrong passwords both fail with
/// [`CoordinationError::InvalidCredentials`] after a full bcrypt verification.
#[tracing::instrument(skip_all)]
pub async fn login_core(
    ctx: &AuthContext,
    form: LoginForm,
) -> Result<(User, HeaderMap), CoordinationError> {
    let form = form.normalize().map_err(CoordinationError::log)?;

    let user = ctx
        .users
        .get_user_by(UserSearchField::Email(form.email))
        .await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let verified = verify_password(ctx.hasher.clone(), form.password, stored_hash).await?;

    let Some(user) = user.filter(|_| verified) else {
        return Err(CoordinationError::InvalidCredentials.log());
    };

    let headers = ctx.sessions.login(user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((user, headers))
}

/// End the session named by the request cookies
///
/// Returns headers that expire the session cookie.
#[tracing::instrument(skip_all)]
pub async fn logout_core(
    ctx: &AuthContext,
    headers: &HeaderMap,
) -> Result<HeaderMap, CoordinationError> {
    Ok(ctx.sessions.logout(headers).await?)
}

/// The logged in user, or `None` for anonymous requests
///
/// A session whose user no longer exists counts as anonymous.
pub async fn get_session_user(
    ctx: &AuthContext,
    headers: &HeaderMap,
) -> Result<Option<User>, CoordinationError> {
    let Some(user_id) = ctx.sessions.current_user(headers).await? else {
        return Ok(None);
    };

    let user = ctx.users.get_user(user_id).await?;
    if user.is_none() {
        tracing::warn!(%user_id, "Session refers to a missing user");
    }
    Ok(user)
}

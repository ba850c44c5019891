//! Shared helpers for unit tests

use std::sync::Arc;

use http::header::SET_COOKIE;

use formauth::{
    AuthConfig, AuthContext, CacheStoreType, DataStoreType, LoginForm, RegistrationForm,
    login_core, register_user_core,
};

pub(crate) fn test_config() -> AuthConfig {
    AuthConfig {
        data_store_type: DataStoreType::Sqlite,
        data_store_url: format!(
            "sqlite:file:formauth-axum-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        ),
        cache_store_type: CacheStoreType::Memory,
        cache_store_url: String::new(),
        users_table: "test_users".to_string(),
        server_secret: b"axum-test-secret-axum-test-secret".to_vec(),
        session_cookie_name: "sid".to_string(),
        session_cookie_max_age: 600,
        session_cookie_secure: false,
        bcrypt_cost: 4,
    }
}

pub(crate) async fn test_context() -> Arc<AuthContext> {
    Arc::new(
        AuthContext::new(&test_config())
            .await
            .expect("test context"),
    )
}

pub(crate) async fn register_user(ctx: &AuthContext, username: &str, email: &str, password: &str) {
    register_user_core(
        ctx,
        RegistrationForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
    )
    .await
    .expect("register");
}

/// Log in and return the `name=value` pair of the session cookie
pub(crate) async fn login_cookie(ctx: &AuthContext, email: &str, password: &str) -> String {
    let (_, headers) = login_core(
        ctx,
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        },
    )
    .await
    .expect("login");

    headers
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

//! Shared helpers for unit tests

use http::HeaderMap;
use http::header::{COOKIE, SET_COOKIE};

use crate::config::{AuthConfig, CacheStoreType, DataStoreType};
use crate::context::AuthContext;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-sec";

/// Configuration for a fast, isolated test context
pub(crate) fn test_config(data_store_url: &str) -> AuthConfig {
    AuthConfig {
        data_store_type: DataStoreType::Sqlite,
        data_store_url: data_store_url.to_string(),
        cache_store_type: CacheStoreType::Memory,
        cache_store_url: String::new(),
        users_table: "test_users".to_string(),
        server_secret: TEST_SECRET.to_vec(),
        session_cookie_name: "sid".to_string(),
        session_cookie_max_age: 600,
        session_cookie_secure: false,
        bcrypt_cost: 4,
    }
}

/// A named in-memory database private to the calling test
pub(crate) fn unique_sqlite_url() -> String {
    format!(
        "sqlite:file:formauth-{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4()
    )
}

pub(crate) async fn test_context() -> AuthContext {
    AuthContext::new(&test_config(&unique_sqlite_url()))
        .await
        .expect("test context")
}

/// Turn `Set-Cookie` response headers into a request `Cookie` header
pub(crate) fn request_with_cookies(response: &HeaderMap) -> HeaderMap {
    let cookie = response
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ");

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie.parse().expect("cookie header"));
    headers
}

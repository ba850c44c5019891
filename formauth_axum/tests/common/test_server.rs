use std::sync::Arc;

use tokio::task::JoinHandle;

use formauth::{AuthConfig, CacheStoreType, DataStoreType};
use formauth_axum::{AuthContext, formauth_router};

/// Initialize tracing once for the whole test binary
fn init_test_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Configuration with a private in-memory database and cheap hashing
pub fn test_config() -> AuthConfig {
    AuthConfig {
        data_store_type: DataStoreType::Sqlite,
        data_store_url: format!(
            "sqlite:file:formauth-it-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        ),
        cache_store_type: CacheStoreType::Memory,
        cache_store_url: String::new(),
        users_table: "fa_users".to_string(),
        server_secret: b"integration-test-secret-0123456789".to_vec(),
        session_cookie_name: "SessionId".to_string(),
        session_cookie_max_age: 600,
        session_cookie_secure: false,
        bcrypt_cost: 4,
    }
}

/// A running server for one test
pub struct TestServer {
    server_handle: JoinHandle<()>,
    pub base_url: String,
    pub config: AuthConfig,
}

impl TestServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with(test_config()).await
    }

    pub async fn start_with(config: AuthConfig) -> Result<Self, Box<dyn std::error::Error>> {
        init_test_tracing();

        let ctx = Arc::new(AuthContext::new(&config).await?);
        let app = formauth_router(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {e}");
            }
        });

        Ok(Self {
            server_handle,
            base_url: format!("http://{addr}"),
            config,
        })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

//! Shared handles for every authentication operation

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::coordination::CoordinationError;
use crate::password::{BcryptHasher, PasswordHasher};
use crate::session::{CacheSessionBackend, SessionBackend, SessionManager};
use crate::storage::{connect_cache_store, connect_data_store};
use crate::userdb::UserStore;

/// Connected user store, password hasher and session manager
///
/// Built once at start up and handed to the web layer as shared state.
pub struct AuthContext {
    pub(crate) users: UserStore,
    pub(crate) sessions: SessionManager,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
}

impl AuthContext {
    /// Connect the configured stores, create the users table and keep sessions
    /// in the configured cache store
    #[tracing::instrument(skip_all)]
    pub async fn new(config: &AuthConfig) -> Result<Self, CoordinationError> {
        let cache = connect_cache_store(config.cache_store_type, &config.cache_store_url).await?;
        let backend = CacheSessionBackend::new(cache, config.session_cookie_max_age);
        Self::with_session_backend(config, Arc::new(backend)).await
    }

    /// Like [`AuthContext::new`] but with a caller supplied session backend
    pub async fn with_session_backend(
        config: &AuthConfig,
        backend: Arc<dyn SessionBackend>,
    ) -> Result<Self, CoordinationError> {
        let data_store = connect_data_store(config.data_store_type, &config.data_store_url).await?;
        let users = UserStore::new(data_store, config.users_table.as_str());
        users.init().await?;
        tracing::info!(table = %config.users_table, "User store ready");

        let hasher = BcryptHasher::new(config.bcrypt_cost)?;

        Ok(Self {
            users,
            sessions: SessionManager::new(backend, config),
            hasher: Arc::new(hasher),
        })
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

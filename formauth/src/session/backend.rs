use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

use crate::session::errors::SessionError;
use crate::session::types::StoredSession;
use crate::storage::{CacheData, SharedCacheStore};
use crate::userdb::UserId;
use crate::utils::gen_random_string;

const SESSION_PREFIX: &str = "session";
const SESSION_ID_BYTES: usize = 32;

/// Where authenticated sessions live
///
/// A session id is an opaque string handed to the browser. The backend maps it
/// to the user it was issued for until it expires or is logged out.
#[async_trait]
pub trait SessionBackend: Send + Sync + 'static {
    /// User bound to `session_id`, or `None` for unknown and expired sessions
    async fn current_user(&self, session_id: &str) -> Result<Option<UserId>, SessionError>;

    /// Start a session for `user_id` and return its id
    async fn login(&self, user_id: UserId) -> Result<String, SessionError>;

    /// End the session. Unknown ids are ignored.
    async fn logout(&self, session_id: &str) -> Result<(), SessionError>;
}

/// [`SessionBackend`] over the configured cache store
pub struct CacheSessionBackend {
    store: SharedCacheStore,
    ttl: u64,
}

impl CacheSessionBackend {
    pub(crate) fn new(store: SharedCacheStore, ttl: u64) -> Self {
        Self { store, ttl }
    }
}

#[async_trait]
impl SessionBackend for CacheSessionBackend {
    async fn current_user(&self, session_id: &str) -> Result<Option<UserId>, SessionError> {
        let cached = self.store.lock().await.get(SESSION_PREFIX, session_id).await?;

        let Some(cached) = cached else {
            tracing::debug!("No stored session for cookie");
            return Ok(None);
        };

        let stored: StoredSession = match cached.try_into() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session entry");
                self.logout(session_id).await?;
                return Ok(None);
            }
        };

        if stored.expires_at < Utc::now() {
            tracing::debug!("Session expired at {}", stored.expires_at);
            self.logout(session_id).await?;
            return Ok(None);
        }

        Ok(Some(stored.user_id))
    }

    async fn login(&self, user_id: UserId) -> Result<String, SessionError> {
        let expires_at = i64::try_from(self.ttl)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                SessionError::Storage(format!("Session lifetime of {}s is out of range", self.ttl))
            })?;
        let session_id = gen_random_string(SESSION_ID_BYTES)?;

        let stored = StoredSession {
            user_id,
            expires_at,
            ttl: self.ttl,
        };
        let data: CacheData = stored.try_into()?;

        self.store
            .lock()
            .await
            .put_with_ttl(SESSION_PREFIX, &session_id, data, self.ttl as usize)
            .await?;

        tracing::debug!(%user_id, %expires_at, "Stored new session");
        Ok(session_id)
    }

    async fn logout(&self, session_id: &str) -> Result<(), SessionError> {
        self.store
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await?;
        Ok(())
    }
}

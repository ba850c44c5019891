use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::CacheStoreType;
use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore, SharedCacheStore};

/// Build the configured cache store and verify that it is reachable
pub(crate) async fn connect_cache_store(
    store_type: CacheStoreType,
    store_url: &str,
) -> Result<SharedCacheStore, StorageError> {
    tracing::info!(?store_type, "Initializing cache store");

    let store: Box<dyn CacheStore> = match store_type {
        CacheStoreType::Memory => Box::new(InMemoryCacheStore::new()),
        CacheStoreType::Redis => {
            let client = redis::Client::open(store_url).map_err(|e| {
                tracing::error!("Failed to create Redis client: {}", e);
                StorageError::from(e)
            })?;
            Box::new(RedisCacheStore { client })
        }
    };

    store.init().await.inspect_err(|e| {
        tracing::error!("Failed to connect to cache store: {}", e);
    })?;

    tracing::info!(?store_type, "Connected to cache store");

    Ok(Arc::new(Mutex::new(store)))
}

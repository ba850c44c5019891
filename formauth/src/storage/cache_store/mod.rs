mod config;
mod memory;
mod redis;
mod types;

pub(crate) use config::connect_cache_store;
pub(crate) use types::{CacheStore, SharedCacheStore};

#[cfg(test)]
pub(crate) use types::InMemoryCacheStore;

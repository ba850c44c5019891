//! Database connection setup

use std::{str::FromStr, sync::Arc};

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::DataStoreType;
use crate::storage::errors::StorageError;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

/// Open a connection pool for the configured database
pub(crate) async fn connect_data_store(
    store_type: DataStoreType,
    store_url: &str,
) -> Result<Arc<dyn DataStore>, StorageError> {
    tracing::info!(?store_type, "Initializing data store");

    let store: Arc<dyn DataStore> = match store_type {
        DataStoreType::Sqlite => {
            let opts = SqliteConnectOptions::from_str(store_url)?.create_if_missing(true);

            // An in-memory database lives only as long as its connections, so keep
            // exactly one open for the lifetime of the pool.
            let pool_opts = if is_sqlite_in_memory(store_url) {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new()
            };

            Arc::new(SqliteDataStore {
                pool: pool_opts.connect_with(opts).await?,
            })
        }
        DataStoreType::Postgres => Arc::new(PostgresDataStore {
            pool: PgPoolOptions::new().connect(store_url).await?,
        }),
    };

    tracing::info!(?store_type, "Connected to database");

    Ok(store)
}

fn is_sqlite_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

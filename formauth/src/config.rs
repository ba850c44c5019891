//! Central configuration for the formauth crate
//!
//! Values are read once from the environment by [`AuthConfig::from_env`] and then
//! handed to [`crate::AuthContext::new`]. Nothing else in the crate reads the
//! environment.

use std::str::FromStr;

use thiserror::Error;

const DEFAULT_TABLE_PREFIX: &str = "fa_";
const DEFAULT_SESSION_COOKIE_NAME: &str = "__Host-SessionId";
const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 600;
/// One year
const MAX_SESSION_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Relational database backing the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStoreType {
    Sqlite,
    Postgres,
}

impl FromStr for DataStoreType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" => Ok(Self::Postgres),
            t => Err(ConfigError::Invalid {
                name: "GENERIC_DATA_STORE_TYPE",
                reason: format!(
                    "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
                ),
            }),
        }
    }
}

/// Key/value store backing sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStoreType {
    Memory,
    Redis,
}

impl FromStr for CacheStoreType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            t => Err(ConfigError::Invalid {
                name: "GENERIC_CACHE_STORE_TYPE",
                reason: format!(
                    "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
                ),
            }),
        }
    }
}

/// Everything needed to build an [`crate::AuthContext`]
#[derive(Clone)]
pub struct AuthConfig {
    pub data_store_type: DataStoreType,
    pub data_store_url: String,
    pub cache_store_type: CacheStoreType,
    pub cache_store_url: String,
    pub users_table: String,
    /// Key used to sign session and flash cookies
    pub server_secret: Vec<u8>,
    pub session_cookie_name: String,
    /// Session lifetime in seconds, used for both the cookie and the stored entry
    pub session_cookie_max_age: u64,
    pub session_cookie_secure: bool,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("data_store_type", &self.data_store_type)
            .field("data_store_url", &self.data_store_url)
            .field("cache_store_type", &self.cache_store_type)
            .field("cache_store_url", &self.cache_store_url)
            .field("users_table", &self.users_table)
            .field("server_secret", &"<redacted>")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_cookie_max_age", &self.session_cookie_max_age)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_store_type: DataStoreType = lookup("GENERIC_DATA_STORE_TYPE")
            .ok_or(ConfigError::Missing("GENERIC_DATA_STORE_TYPE"))?
            .parse()?;
        let data_store_url = lookup("GENERIC_DATA_STORE_URL")
            .ok_or(ConfigError::Missing("GENERIC_DATA_STORE_URL"))?;

        let cache_store_type: CacheStoreType = match lookup("GENERIC_CACHE_STORE_TYPE") {
            Some(t) => t.parse()?,
            None => CacheStoreType::Memory,
        };
        let cache_store_url = lookup("GENERIC_CACHE_STORE_URL").unwrap_or_default();
        if cache_store_type == CacheStoreType::Redis && cache_store_url.is_empty() {
            return Err(ConfigError::Missing("GENERIC_CACHE_STORE_URL"));
        }

        let table_prefix =
            lookup("DB_TABLE_PREFIX").unwrap_or_else(|| DEFAULT_TABLE_PREFIX.to_string());
        let users_table =
            lookup("DB_TABLE_USERS").unwrap_or_else(|| format!("{table_prefix}users"));
        validate_table_name(&users_table)?;

        let server_secret = lookup("AUTH_SERVER_SECRET")
            .ok_or(ConfigError::Missing("AUTH_SERVER_SECRET"))?
            .into_bytes();
        if server_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "AUTH_SERVER_SECRET",
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }

        let session_cookie_name = lookup("SESSION_COOKIE_NAME")
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());
        let session_cookie_max_age = match lookup("SESSION_COOKIE_MAX_AGE") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|age| (1..=MAX_SESSION_COOKIE_MAX_AGE).contains(age))
                .ok_or_else(|| ConfigError::Invalid {
                    name: "SESSION_COOKIE_MAX_AGE",
                    reason: format!(
                        "expected between 1 and {MAX_SESSION_COOKIE_MAX_AGE} seconds, got '{v}'"
                    ),
                })?,
            None => DEFAULT_SESSION_COOKIE_MAX_AGE,
        };
        let session_cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .map(|val| val.to_lowercase() != "false")
            .unwrap_or(true);
        if session_cookie_name.starts_with("__Host-") && !session_cookie_secure {
            return Err(ConfigError::Invalid {
                name: "SESSION_COOKIE_NAME",
                reason: "__Host- cookies require SESSION_COOKIE_SECURE=true".to_string(),
            });
        }

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| ConfigError::Invalid {
                    name: "BCRYPT_COST",
                    reason: format!("expected an integer between 4 and 31, got '{v}'"),
                })?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            data_store_type,
            data_store_url,
            cache_store_type,
            cache_store_url,
            users_table,
            server_secret,
            session_cookie_name,
            session_cookie_max_age,
            session_cookie_secure,
            bcrypt_cost,
        })
    }
}

// Table names are spliced into SQL text, so only identifier characters are allowed.
fn validate_table_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: "DB_TABLE_USERS",
            reason: format!("'{name}' is not a valid table name"),
        })
    }
}

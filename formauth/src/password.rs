//! Password hashing
//!
//! Hashing and verification are CPU bound. [`hash_password`] and
//! [`verify_password`] move the work onto the blocking thread pool so request
//! handling threads stay free.

use std::sync::Arc;

use thiserror::Error;

const DUMMY_PASSWORD: &str = "formauth-timing-equaliser";

/// bcrypt only reads this many bytes of a password
pub(crate) const PASSWORD_MAX_BYTES: usize = 72;

#[derive(Debug, Error, Clone)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hash(String),

    #[error("Hashing task failed: {0}")]
    Task(String),
}

impl From<bcrypt::BcryptError> for PasswordError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Hash(err.to_string())
    }
}

/// Produces and checks opaque password hashes
pub(crate) trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;

    /// A valid hash of an unguessable password with the same cost as real hashes.
    /// Verifying against it takes as long as verifying against a stored user.
    fn dummy_hash(&self) -> &str;
}

/// bcrypt with a fixed work factor
///
/// Passwords longer than [`PASSWORD_MAX_BYTES`] are refused by `hash` and never
/// verify, so bcrypt's silent truncation cannot make two passwords equal.
pub(crate) struct BcryptHasher {
    cost: u32,
    dummy_hash: String,
}

impl BcryptHasher {
    pub(crate) fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        tracing::debug!(cost, "Initialized bcrypt hasher");
        Ok(Self { cost, dummy_hash })
    }
}

impl std::fmt::Debug for BcryptHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BcryptHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(PasswordError::Hash(format!(
                "password is longer than {PASSWORD_MAX_BYTES} bytes"
            )));
        }
        Ok(bcrypt::hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let matched = bcrypt::verify(password, hash)?;
        Ok(matched && password.len() <= PASSWORD_MAX_BYTES)
    }

    fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }
}

/// Hash `password` on the blocking thread pool
pub(crate) async fn hash_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// Verify `password` on the blocking thread pool.
///
/// With `hash` set to `None` the dummy hash is checked instead and the result is
/// always `false`.
pub(crate) async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    hash: Option<String>,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => hasher.verify(&password, &hash),
        None => {
            let _ = hasher.verify(&password, hasher.dummy_hash())?;
            Ok(false)
        }
    })
    .await
    .map_err(|e| PasswordError::Task(e.to_string()))?
}

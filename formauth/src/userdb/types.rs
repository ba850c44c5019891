use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::UserError;

/// Longest accepted username, in characters
pub const USERNAME_MAX_LEN: usize = 15;
/// Longest accepted email address, in characters
pub const EMAIL_MAX_LEN: usize = 50;

/// Database-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user as stored in the users table
#[derive(Clone, Serialize, FromRow, PartialEq)]
pub struct User {
    /// Monotonic primary key
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// bcrypt hash of the password, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Fields supplied when inserting a user
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Check the column bounds before touching the database
    pub(crate) fn validate(&self) -> Result<(), UserError> {
        check_len("username", &self.username, USERNAME_MAX_LEN)?;
        check_len("email", &self.email, EMAIL_MAX_LEN)?;
        if self.password_hash.is_empty() {
            return Err(UserError::InvalidData(
                "password hash must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), UserError> {
    let len = value.chars().count();
    if len == 0 {
        Err(UserError::InvalidData(format!("{field} must not be empty")))
    } else if len > max {
        Err(UserError::InvalidData(format!(
            "{field} must be at most {max} characters"
        )))
    } else {
        Ok(())
    }
}

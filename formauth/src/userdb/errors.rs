use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User with this username or email already exists")]
    Duplicate,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => UserError::Duplicate,
            _ => UserError::Storage(err.to_string()),
        }
    }
}

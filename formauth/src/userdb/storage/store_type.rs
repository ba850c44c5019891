use std::fmt;
use std::sync::Arc;

use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    types::{NewUser, User, UserId},
};

use super::postgres::*;
use super::sqlite::*;

/// Column used to look a user up
#[derive(Debug, Clone)]
pub(crate) enum UserSearchField {
    Id(UserId),
    Email(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values stay out of logs, only the column is shown
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Email(_) => write!(f, "email"),
        }
    }
}

/// Create/read access to the users table
#[derive(Clone)]
pub struct UserStore {
    data_store: Arc<dyn DataStore>,
    table_name: String,
}

impl UserStore {
    pub(crate) fn new(data_store: Arc<dyn DataStore>, table_name: impl Into<String>) -> Self {
        Self {
            data_store,
            table_name: table_name.into(),
        }
    }

    /// Create the users table if needed and check its columns
    pub(crate) async fn init(&self) -> Result<(), UserError> {
        let store = &self.data_store;
        let table = self.table_name.as_str();

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool, table).await?;
                validate_user_tables_sqlite(pool, table).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool, table).await?;
                validate_user_tables_postgres(pool, table).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Id(id)).await
    }

    #[tracing::instrument(skip(self), fields(user_field = %field))]
    pub(crate) async fn get_user_by(
        &self,
        field: UserSearchField,
    ) -> Result<Option<User>, UserError> {
        let store = &self.data_store;
        let table = self.table_name.as_str();

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, table, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, table, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    /// Insert a new user
    ///
    /// Returns [`UserError::Duplicate`] when the username or email is already taken.
    #[tracing::instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: NewUser) -> Result<User, UserError> {
        user.validate()?;

        let store = &self.data_store;
        let table = self.table_name.as_str();

        let result = if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, table, user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, table, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User created");
            }
            Err(UserError::Duplicate) => {
                tracing::info!("User creation rejected: username or email taken");
            }
            Err(e) => {
                tracing::error!(error = %e, "User creation failed");
            }
        }

        result
    }
}

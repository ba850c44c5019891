use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{NewUser, User},
};

use super::store_type::UserSearchField;

// SQLite implementations
pub(super) async fn create_tables_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
) -> Result<(), UserError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Validates that the User table schema matches what we expect
pub(super) async fn validate_user_tables_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
) -> Result<(), UserError> {
    let expected_columns = [
        ("id", "INTEGER"),
        ("username", "TEXT"),
        ("email", "TEXT"),
        ("password_hash", "TEXT"),
        ("created_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, table_name, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE id = ?
            "#
        ))
        .bind(*id)
        .fetch_optional(pool)
        .await
        .map_err(UserError::from),
        UserSearchField::Email(email) => sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE email = ?
            "#
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(UserError::from),
    }
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    user: NewUser,
) -> Result<User, UserError> {
    let now = chrono::Utc::now();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (username, email, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        "#
    ))
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    // Fetch the row back to pick up the assigned id
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
    .map_err(UserError::from)
}

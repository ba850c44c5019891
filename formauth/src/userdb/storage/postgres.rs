use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN, User},
};

use super::store_type::UserSearchField;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
) -> Result<(), UserError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR({USERNAME_MAX_LEN}) NOT NULL UNIQUE,
            email VARCHAR({EMAIL_MAX_LEN}) NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Validates that the User table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
) -> Result<(), UserError> {
    let expected_columns = [
        ("id", "bigint"),
        ("username", "character varying"),
        ("email", "character varying"),
        ("password_hash", "text"),
        ("created_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, table_name, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_by_field_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE id = $1
            "#
        ))
        .bind(*id)
        .fetch_optional(pool)
        .await
        .map_err(UserError::from),
        UserSearchField::Email(email) => sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(UserError::from),
    }
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    table_name: &str,
    user: NewUser,
) -> Result<User, UserError> {
    let now = chrono::Utc::now();

    // The unique constraints reject a conflicting insert atomically
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {table_name} (username, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#
    ))
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(UserError::from)
}

//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{format_timestamp, map_db_error, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    age: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: parse_uuid(&row.id)?,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            age: row.age,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const SELECT_USER: &str =
    "SELECT id, username, email, password_hash, age, created_at, updated_at FROM users";

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn insert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, age, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(format_timestamp(user.created_at))
        .bind(format_timestamp(user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("user", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = ?", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn update(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET username = ?, email = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(format_timestamp(user.updated_at))
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("user", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(user.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

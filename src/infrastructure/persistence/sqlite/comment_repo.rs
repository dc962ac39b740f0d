//! SQLite Comment Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{format_timestamp, map_db_error, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{
    CommentRecord, CommentRepositoryPort, CommentWithAuthor, RepositoryError, UserSummary,
};

/// SQLite Comment Repository
pub struct SqliteCommentRepository {
    pool: DbPool,
}

impl SqliteCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: String,
    message: String,
    photo_id: String,
    user_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CommentRow> for CommentRecord {
    type Error = RepositoryError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(CommentRecord {
            id: parse_uuid(&row.id)?,
            message: row.message,
            photo_id: parse_uuid(&row.photo_id)?,
            user_id: parse_uuid(&row.user_id)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct CommentAuthorRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    author_username: String,
    author_email: String,
}

impl TryFrom<CommentAuthorRow> for CommentWithAuthor {
    type Error = RepositoryError;

    fn try_from(row: CommentAuthorRow) -> Result<Self, Self::Error> {
        let comment = CommentRecord::try_from(row.comment)?;
        Ok(CommentWithAuthor {
            author: UserSummary {
                id: comment.user_id,
                username: row.author_username,
                email: row.author_email,
            },
            comment,
        })
    }
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT c.id AS id, c.message AS message, c.photo_id AS photo_id, c.user_id AS user_id,
           c.created_at AS created_at, c.updated_at AS updated_at,
           u.username AS author_username, u.email AS author_email
    FROM comments c
    JOIN users u ON u.id = c.user_id
"#;

#[async_trait]
impl CommentRepositoryPort for SqliteCommentRepository {
    async fn insert(&self, comment: &CommentRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, message, photo_id, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.id.to_string())
        .bind(&comment.message)
        .bind(comment.photo_id.to_string())
        .bind(comment.user_id.to_string())
        .bind(format_timestamp(comment.created_at))
        .bind(format_timestamp(comment.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("comment", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommentRecord>, RepositoryError> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT id, message, photo_id, user_id, created_at, updated_at FROM comments WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(CommentRecord::try_from).transpose()
    }

    async fn find_all_with_author(
        &self,
        photo_id: Option<Uuid>,
    ) -> Result<Vec<CommentWithAuthor>, RepositoryError> {
        let rows: Vec<CommentAuthorRow> = match photo_id {
            Some(photo_id) => {
                sqlx::query_as(&format!(
                    "{} WHERE c.photo_id = ? ORDER BY c.created_at DESC",
                    SELECT_WITH_AUTHOR
                ))
                .bind(photo_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("{} ORDER BY c.created_at DESC", SELECT_WITH_AUTHOR))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(CommentWithAuthor::try_from).collect()
    }

    async fn update(&self, comment: &CommentRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE comments SET message = ?, updated_at = ? WHERE id = ?")
            .bind(&comment.message)
            .bind(format_timestamp(comment.updated_at))
            .bind(comment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("comment", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(comment.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

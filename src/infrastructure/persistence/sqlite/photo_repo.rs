//! SQLite Photo Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{format_timestamp, map_db_error, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{
    PhotoRecord, PhotoRepositoryPort, PhotoWithOwner, RepositoryError, UserSummary,
};

/// SQLite Photo Repository
pub struct SqlitePhotoRepository {
    pool: DbPool,
}

impl SqlitePhotoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PhotoRow {
    id: String,
    title: String,
    caption: String,
    photo_url: String,
    user_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PhotoRow> for PhotoRecord {
    type Error = RepositoryError;

    fn try_from(row: PhotoRow) -> Result<Self, Self::Error> {
        Ok(PhotoRecord {
            id: parse_uuid(&row.id)?,
            title: row.title,
            caption: row.caption,
            photo_url: row.photo_url,
            user_id: parse_uuid(&row.user_id)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct PhotoOwnerRow {
    #[sqlx(flatten)]
    photo: PhotoRow,
    owner_username: String,
    owner_email: String,
}

impl TryFrom<PhotoOwnerRow> for PhotoWithOwner {
    type Error = RepositoryError;

    fn try_from(row: PhotoOwnerRow) -> Result<Self, Self::Error> {
        let photo = PhotoRecord::try_from(row.photo)?;
        Ok(PhotoWithOwner {
            owner: UserSummary {
                id: photo.user_id,
                username: row.owner_username,
                email: row.owner_email,
            },
            photo,
        })
    }
}

#[async_trait]
impl PhotoRepositoryPort for SqlitePhotoRepository {
    async fn insert(&self, photo: &PhotoRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO photos (id, title, caption, photo_url, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(photo.id.to_string())
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(photo.user_id.to_string())
        .bind(format_timestamp(photo.created_at))
        .bind(format_timestamp(photo.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("photo", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PhotoRecord>, RepositoryError> {
        let row: Option<PhotoRow> = sqlx::query_as(
            "SELECT id, title, caption, photo_url, user_id, created_at, updated_at FROM photos WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(PhotoRecord::try_from).transpose()
    }

    async fn find_all_with_owner(&self) -> Result<Vec<PhotoWithOwner>, RepositoryError> {
        let rows: Vec<PhotoOwnerRow> = sqlx::query_as(
            r#"
            SELECT p.id AS id, p.title AS title, p.caption AS caption,
                   p.photo_url AS photo_url, p.user_id AS user_id,
                   p.created_at AS created_at, p.updated_at AS updated_at,
                   u.username AS owner_username, u.email AS owner_email
            FROM photos p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PhotoWithOwner::try_from).collect()
    }

    async fn update(&self, photo: &PhotoRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE photos SET title = ?, caption = ?, photo_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(format_timestamp(photo.updated_at))
        .bind(photo.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("photo", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(photo.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

//! SQLite SocialMedia Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{format_timestamp, map_db_error, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{
    RepositoryError, SocialMediaRecord, SocialMediaRepositoryPort, SocialMediaWithOwner,
    UserSummary,
};

/// SQLite SocialMedia Repository
pub struct SqliteSocialMediaRepository {
    pool: DbPool,
}

impl SqliteSocialMediaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SocialMediaRow {
    id: String,
    name: String,
    social_media_url: String,
    user_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SocialMediaRow> for SocialMediaRecord {
    type Error = RepositoryError;

    fn try_from(row: SocialMediaRow) -> Result<Self, Self::Error> {
        Ok(SocialMediaRecord {
            id: parse_uuid(&row.id)?,
            name: row.name,
            social_media_url: row.social_media_url,
            user_id: parse_uuid(&row.user_id)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct SocialMediaOwnerRow {
    #[sqlx(flatten)]
    social_media: SocialMediaRow,
    owner_username: String,
    owner_email: String,
}

#[async_trait]
impl SocialMediaRepositoryPort for SqliteSocialMediaRepository {
    async fn insert(&self, social_media: &SocialMediaRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO social_medias (id, name, social_media_url, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(social_media.id.to_string())
        .bind(&social_media.name)
        .bind(&social_media.social_media_url)
        .bind(social_media.user_id.to_string())
        .bind(format_timestamp(social_media.created_at))
        .bind(format_timestamp(social_media.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("social media", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SocialMediaRecord>, RepositoryError> {
        let row: Option<SocialMediaRow> = sqlx::query_as(
            "SELECT id, name, social_media_url, user_id, created_at, updated_at FROM social_medias WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SocialMediaRecord::try_from).transpose()
    }

    async fn find_all_with_owner(&self) -> Result<Vec<SocialMediaWithOwner>, RepositoryError> {
        let rows: Vec<SocialMediaOwnerRow> = sqlx::query_as(
            r#"
            SELECT s.id AS id, s.name AS name, s.social_media_url AS social_media_url,
                   s.user_id AS user_id, s.created_at AS created_at, s.updated_at AS updated_at,
                   u.username AS owner_username, u.email AS owner_email
            FROM social_medias s
            JOIN users u ON u.id = s.user_id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let social_media = SocialMediaRecord::try_from(row.social_media)?;
                Ok(SocialMediaWithOwner {
                    owner: UserSummary {
                        id: social_media.user_id,
                        username: row.owner_username,
                        email: row.owner_email,
                    },
                    social_media,
                })
            })
            .collect()
    }

    async fn update(&self, social_media: &SocialMediaRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE social_medias SET name = ?, social_media_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&social_media.name)
        .bind(&social_media.social_media_url)
        .bind(format_timestamp(social_media.updated_at))
        .bind(social_media.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("social media", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(social_media.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM social_medias WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

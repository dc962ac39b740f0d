//! SocialMedia UseCase

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateSocialMedia, DeleteSocialMedia, UpdateSocialMedia};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    SocialMediaRecord, SocialMediaRepositoryPort, SocialMediaWithOwner,
};
use crate::domain::social_media::{SocialMediaName, SocialMediaUrl};

/// SocialMedia 模块业务接口
#[async_trait]
pub trait SocialMediaUseCase: Send + Sync {
    async fn create(&self, command: CreateSocialMedia)
        -> Result<SocialMediaRecord, ApplicationError>;

    async fn list(&self) -> Result<Vec<SocialMediaWithOwner>, ApplicationError>;

    async fn update(&self, command: UpdateSocialMedia)
        -> Result<SocialMediaRecord, ApplicationError>;

    async fn delete(&self, command: DeleteSocialMedia) -> Result<(), ApplicationError>;
}

/// SocialMedia 模块业务实现
pub struct SocialMediaService {
    social_media_repo: Arc<dyn SocialMediaRepositoryPort>,
}

impl SocialMediaService {
    pub fn new(social_media_repo: Arc<dyn SocialMediaRepositoryPort>) -> Self {
        Self { social_media_repo }
    }

    async fn owned(&self, id: Uuid, actor_id: Uuid) -> Result<SocialMediaRecord, ApplicationError> {
        let social_media = self
            .social_media_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("SocialMedia", id))?;

        if social_media.user_id != actor_id {
            return Err(ApplicationError::forbidden(
                "You are not allowed to modify this social media",
            ));
        }
        Ok(social_media)
    }
}

#[async_trait]
impl SocialMediaUseCase for SocialMediaService {
    async fn create(
        &self,
        command: CreateSocialMedia,
    ) -> Result<SocialMediaRecord, ApplicationError> {
        let name = SocialMediaName::new(&command.name).map_err(ApplicationError::validation)?;
        let url =
            SocialMediaUrl::new(&command.social_media_url).map_err(ApplicationError::validation)?;

        let now = Utc::now();
        let social_media = SocialMediaRecord {
            id: Uuid::new_v4(),
            name: name.into_inner(),
            social_media_url: url.into_inner(),
            user_id: command.actor_id,
            created_at: now,
            updated_at: now,
        };

        self.social_media_repo.insert(&social_media).await?;

        tracing::info!(
            social_media_id = %social_media.id,
            user_id = %social_media.user_id,
            "Social media created"
        );
        Ok(social_media)
    }

    async fn list(&self) -> Result<Vec<SocialMediaWithOwner>, ApplicationError> {
        Ok(self.social_media_repo.find_all_with_owner().await?)
    }

    async fn update(
        &self,
        command: UpdateSocialMedia,
    ) -> Result<SocialMediaRecord, ApplicationError> {
        let name = SocialMediaName::new(&command.name).map_err(ApplicationError::validation)?;
        let url =
            SocialMediaUrl::new(&command.social_media_url).map_err(ApplicationError::validation)?;

        let mut social_media = self.owned(command.social_media_id, command.actor_id).await?;
        social_media.name = name.into_inner();
        social_media.social_media_url = url.into_inner();
        social_media.updated_at = Utc::now();

        self.social_media_repo.update(&social_media).await?;

        tracing::info!(social_media_id = %social_media.id, "Social media updated");
        Ok(social_media)
    }

    async fn delete(&self, command: DeleteSocialMedia) -> Result<(), ApplicationError> {
        let social_media = self.owned(command.social_media_id, command.actor_id).await?;
        self.social_media_repo.delete(social_media.id).await?;

        tracing::info!(social_media_id = %social_media.id, "Social media deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        memory_pool, seed_user, SqliteSocialMediaRepository,
    };

    #[tokio::test]
    async fn test_crud_with_ownership() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let service = SocialMediaService::new(Arc::new(SqliteSocialMediaRepository::new(pool)));

        let created = service
            .create(CreateSocialMedia {
                actor_id: alice,
                name: "Instagram".to_string(),
                social_media_url: "https://instagram.com/alice".to_string(),
            })
            .await
            .unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner.username, "alice");

        let err = service
            .update(UpdateSocialMedia {
                actor_id: bob,
                social_media_id: created.id,
                name: "Hijacked".to_string(),
                social_media_url: "https://instagram.com/bob".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));

        let updated = service
            .update(UpdateSocialMedia {
                actor_id: alice,
                social_media_id: created.id,
                name: "Twitter".to_string(),
                social_media_url: "https://twitter.com/alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Twitter");

        service
            .delete(DeleteSocialMedia { actor_id: alice, social_media_id: created.id })
            .await
            .unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_social_media_is_not_found() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let service = SocialMediaService::new(Arc::new(SqliteSocialMediaRepository::new(pool)));

        let err = service
            .delete(DeleteSocialMedia { actor_id: alice, social_media_id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}

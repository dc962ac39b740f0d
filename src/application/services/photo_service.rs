//! Photo UseCase
//!
//! 同时实现 `PhotoLookup`，作为 Comment 模块访问照片的唯一入口

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreatePhoto, DeletePhoto, UpdatePhoto};
use crate::application::error::ApplicationError;
use crate::application::ports::{PhotoLookup, PhotoRecord, PhotoRepositoryPort, PhotoWithOwner};
use crate::domain::photo::{Caption, PhotoTitle, PhotoUrl};

/// Photo 模块业务接口
#[async_trait]
pub trait PhotoUseCase: Send + Sync {
    async fn create(&self, command: CreatePhoto) -> Result<PhotoRecord, ApplicationError>;

    async fn list(&self) -> Result<Vec<PhotoWithOwner>, ApplicationError>;

    async fn get(&self, photo_id: Uuid) -> Result<PhotoRecord, ApplicationError>;

    async fn update(&self, command: UpdatePhoto) -> Result<PhotoRecord, ApplicationError>;

    async fn delete(&self, command: DeletePhoto) -> Result<(), ApplicationError>;
}

/// Photo 模块业务实现
pub struct PhotoService {
    photo_repo: Arc<dyn PhotoRepositoryPort>,
}

impl PhotoService {
    pub fn new(photo_repo: Arc<dyn PhotoRepositoryPort>) -> Self {
        Self { photo_repo }
    }

    /// 读取照片并校验归属
    async fn owned_photo(&self, photo_id: Uuid, actor_id: Uuid) -> Result<PhotoRecord, ApplicationError> {
        let photo = self.get(photo_id).await?;
        if photo.user_id != actor_id {
            return Err(ApplicationError::forbidden(
                "You are not allowed to modify this photo",
            ));
        }
        Ok(photo)
    }
}

#[async_trait]
impl PhotoUseCase for PhotoService {
    async fn create(&self, command: CreatePhoto) -> Result<PhotoRecord, ApplicationError> {
        let title = PhotoTitle::new(&command.title).map_err(ApplicationError::validation)?;
        let caption =
            Caption::new(command.caption.as_deref()).map_err(ApplicationError::validation)?;
        let photo_url = PhotoUrl::new(&command.photo_url).map_err(ApplicationError::validation)?;

        let now = Utc::now();
        let photo = PhotoRecord {
            id: Uuid::new_v4(),
            title: title.into_inner(),
            caption: caption.into_inner(),
            photo_url: photo_url.into_inner(),
            user_id: command.actor_id,
            created_at: now,
            updated_at: now,
        };

        self.photo_repo.insert(&photo).await?;

        tracing::info!(photo_id = %photo.id, user_id = %photo.user_id, "Photo created");
        Ok(photo)
    }

    async fn list(&self) -> Result<Vec<PhotoWithOwner>, ApplicationError> {
        Ok(self.photo_repo.find_all_with_owner().await?)
    }

    async fn get(&self, photo_id: Uuid) -> Result<PhotoRecord, ApplicationError> {
        self.photo_repo
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Photo", photo_id))
    }

    async fn update(&self, command: UpdatePhoto) -> Result<PhotoRecord, ApplicationError> {
        let title = PhotoTitle::new(&command.title).map_err(ApplicationError::validation)?;
        let caption =
            Caption::new(command.caption.as_deref()).map_err(ApplicationError::validation)?;
        let photo_url = PhotoUrl::new(&command.photo_url).map_err(ApplicationError::validation)?;

        let mut photo = self.owned_photo(command.photo_id, command.actor_id).await?;
        photo.title = title.into_inner();
        photo.caption = caption.into_inner();
        photo.photo_url = photo_url.into_inner();
        photo.updated_at = Utc::now();

        self.photo_repo.update(&photo).await?;

        tracing::info!(photo_id = %photo.id, "Photo updated");
        Ok(photo)
    }

    async fn delete(&self, command: DeletePhoto) -> Result<(), ApplicationError> {
        let photo = self.owned_photo(command.photo_id, command.actor_id).await?;
        self.photo_repo.delete(photo.id).await?;

        tracing::info!(photo_id = %photo.id, "Photo deleted");
        Ok(())
    }
}

#[async_trait]
impl PhotoLookup for PhotoService {
    async fn photo_exists(&self, photo_id: Uuid) -> Result<bool, ApplicationError> {
        Ok(self.photo_repo.find_by_id(photo_id).await?.is_some())
    }

    async fn photo_owner(&self, photo_id: Uuid) -> Result<Option<Uuid>, ApplicationError> {
        Ok(self
            .photo_repo
            .find_by_id(photo_id)
            .await?
            .map(|photo| photo.user_id))
    }
}

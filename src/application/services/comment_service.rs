//! Comment UseCase
//!
//! 只依赖自身仓储；照片是否存在、归属于谁由 Delivery 层经 `PhotoLookup` 询问后传入

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateComment, DeleteComment, ListComments, UpdateComment};
use crate::application::error::ApplicationError;
use crate::application::ports::{CommentRecord, CommentRepositoryPort, CommentWithAuthor};
use crate::domain::comment::CommentMessage;

/// Comment 模块业务接口
#[async_trait]
pub trait CommentUseCase: Send + Sync {
    async fn create(&self, command: CreateComment) -> Result<CommentRecord, ApplicationError>;

    async fn list(&self, query: ListComments) -> Result<Vec<CommentWithAuthor>, ApplicationError>;

    async fn get(&self, comment_id: Uuid) -> Result<CommentRecord, ApplicationError>;

    async fn update(&self, command: UpdateComment) -> Result<CommentRecord, ApplicationError>;

    async fn delete(&self, command: DeleteComment) -> Result<(), ApplicationError>;
}

/// Comment 模块业务实现
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepositoryPort>,
}

impl CommentService {
    pub fn new(comment_repo: Arc<dyn CommentRepositoryPort>) -> Self {
        Self { comment_repo }
    }
}

#[async_trait]
impl CommentUseCase for CommentService {
    async fn create(&self, command: CreateComment) -> Result<CommentRecord, ApplicationError> {
        let message = CommentMessage::new(&command.message).map_err(ApplicationError::validation)?;

        let now = Utc::now();
        let comment = CommentRecord {
            id: Uuid::new_v4(),
            message: message.into_inner(),
            photo_id: command.photo_id,
            user_id: command.actor_id,
            created_at: now,
            updated_at: now,
        };

        self.comment_repo.insert(&comment).await?;

        tracing::info!(
            comment_id = %comment.id,
            photo_id = %comment.photo_id,
            user_id = %comment.user_id,
            "Comment created"
        );
        Ok(comment)
    }

    async fn list(&self, query: ListComments) -> Result<Vec<CommentWithAuthor>, ApplicationError> {
        Ok(self.comment_repo.find_all_with_author(query.photo_id).await?)
    }

    async fn get(&self, comment_id: Uuid) -> Result<CommentRecord, ApplicationError> {
        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Comment", comment_id))
    }

    async fn update(&self, command: UpdateComment) -> Result<CommentRecord, ApplicationError> {
        let message = CommentMessage::new(&command.message).map_err(ApplicationError::validation)?;

        let mut comment = self.get(command.comment_id).await?;
        if comment.user_id != command.actor_id {
            return Err(ApplicationError::forbidden(
                "Only the author can edit this comment",
            ));
        }

        comment.message = message.into_inner();
        comment.updated_at = Utc::now();
        self.comment_repo.update(&comment).await?;

        tracing::info!(comment_id = %comment.id, "Comment updated");
        Ok(comment)
    }

    async fn delete(&self, command: DeleteComment) -> Result<(), ApplicationError> {
        let comment = self.get(command.comment_id).await?;

        let is_author = comment.user_id == command.actor_id;
        let is_photo_owner = command.photo_owner_id == Some(command.actor_id);
        if !is_author && !is_photo_owner {
            return Err(ApplicationError::forbidden(
                "Only the author or the photo owner can delete this comment",
            ));
        }

        self.comment_repo.delete(comment.id).await?;

        tracing::info!(
            comment_id = %comment.id,
            by_photo_owner = !is_author,
            "Comment deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PhotoRecord;
    use crate::application::ports::PhotoRepositoryPort;
    use crate::infrastructure::persistence::sqlite::{
        memory_pool, seed_user, SqliteCommentRepository, SqlitePhotoRepository,
    };

    struct Fixture {
        service: CommentService,
        alice: Uuid,
        bob: Uuid,
        carol: Uuid,
        photo_id: Uuid,
    }

    /// alice 拥有照片，bob 在上面评论
    async fn fixture() -> Fixture {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let carol = seed_user(&pool, "carol").await;

        let now = Utc::now();
        let photo = PhotoRecord {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            caption: String::new(),
            photo_url: "https://example.com/p.png".to_string(),
            user_id: alice,
            created_at: now,
            updated_at: now,
        };
        SqlitePhotoRepository::new(pool.clone())
            .insert(&photo)
            .await
            .unwrap();

        Fixture {
            service: CommentService::new(Arc::new(SqliteCommentRepository::new(pool))),
            alice,
            bob,
            carol,
            photo_id: photo.id,
        }
    }

    #[tokio::test]
    async fn test_only_author_can_edit() {
        let f = fixture().await;
        let comment = f
            .service
            .create(CreateComment {
                actor_id: f.bob,
                photo_id: f.photo_id,
                message: "nice".to_string(),
            })
            .await
            .unwrap();

        let err = f
            .service
            .update(UpdateComment {
                actor_id: f.alice,
                comment_id: comment.id,
                message: "edited".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));

        let edited = f
            .service
            .update(UpdateComment {
                actor_id: f.bob,
                comment_id: comment.id,
                message: "very nice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(edited.message, "very nice");
    }

    #[tokio::test]
    async fn test_photo_owner_can_delete_others_comment() {
        let f = fixture().await;
        let comment = f
            .service
            .create(CreateComment {
                actor_id: f.bob,
                photo_id: f.photo_id,
                message: "spam".to_string(),
            })
            .await
            .unwrap();

        let err = f
            .service
            .delete(DeleteComment {
                actor_id: f.carol,
                comment_id: comment.id,
                photo_owner_id: Some(f.alice),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));

        f.service
            .delete(DeleteComment {
                actor_id: f.alice,
                comment_id: comment.id,
                photo_owner_id: Some(f.alice),
            })
            .await
            .unwrap();

        let remaining = f.service.list(ListComments::default()).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let f = fixture().await;
        let err = f
            .service
            .create(CreateComment {
                actor_id: f.bob,
                photo_id: f.photo_id,
                message: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}

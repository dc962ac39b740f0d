//! Comment Delivery - `/comments`
//!
//! 除自身 UseCase 外只拿到 `PhotoLookup`：照片是否存在、归属谁都通过它询问

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateComment, DeleteComment, ListComments, UpdateComment};
use crate::application::{CommentRecord, CommentUseCase, CommentWithAuthor, PhotoLookup};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{parse_id, ApiJson, ApiResponse, MessageResponse, UserRef};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::registry::{ModuleRoutes, RouteConflict, RouteRegistry};

/// Comment 路由共享状态
#[derive(Clone)]
pub struct CommentDelivery {
    comments: Arc<dyn CommentUseCase>,
    photos: Arc<dyn PhotoLookup>,
}

impl CommentDelivery {
    async fn ensure_photo_exists(&self, photo_id: Uuid) -> Result<(), ApiError> {
        if self.photos.photo_exists(photo_id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("Photo not found: {}", photo_id)))
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub photo_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub photo_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub message: String,
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CommentRecord> for CommentResponse {
    fn from(comment: CommentRecord) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListItem {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub user: UserRef,
}

impl From<CommentWithAuthor> for CommentListItem {
    fn from(item: CommentWithAuthor) -> Self {
        Self {
            comment: item.comment.into(),
            user: UserRef {
                id: Some(item.author.id),
                username: item.author.username,
                email: Some(item.author.email),
            },
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// 挂载 Comment 模块路由
pub fn register(
    registry: &mut RouteRegistry,
    comments: Arc<dyn CommentUseCase>,
    photos: Arc<dyn PhotoLookup>,
) -> Result<(), RouteConflict> {
    let routes = ModuleRoutes::new("comment", "/comments")
        .post("", create_comment)
        .get("", list_comments)
        .put("/:comment_id", update_comment)
        .delete("/:comment_id", delete_comment);

    registry.mount(routes, CommentDelivery { comments, photos })
}

// ============================================================================
// Handlers
// ============================================================================

/// 照片不存在时直接 404，不触达评论存储
async fn create_comment(
    State(delivery): State<CommentDelivery>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let photo_id = parse_id("Photo", &req.photo_id)?;
    delivery.ensure_photo_exists(photo_id).await?;

    let comment = delivery
        .comments
        .create(CreateComment {
            actor_id: caller.id,
            photo_id,
            message: req.message,
        })
        .await?;

    Ok(ApiResponse::created(CommentResponse::from(comment)))
}

async fn list_comments(
    State(delivery): State<CommentDelivery>,
    _caller: AuthUser,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<ApiResponse<Vec<CommentListItem>>>, ApiError> {
    let photo_id = match query.photo_id.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let photo_id = parse_id("Photo", raw)?;
            delivery.ensure_photo_exists(photo_id).await?;
            Some(photo_id)
        }
        None => None,
    };

    let items = delivery.comments.list(ListComments { photo_id }).await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(CommentListItem::from).collect(),
    )))
}

/// 仅作者可修改
async fn update_comment(
    State(delivery): State<CommentDelivery>,
    caller: AuthUser,
    Path(comment_id): Path<String>,
    ApiJson(req): ApiJson<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let comment = delivery
        .comments
        .update(UpdateComment {
            actor_id: caller.id,
            comment_id,
            message: req.message,
        })
        .await?;

    Ok(Json(ApiResponse::success(comment.into())))
}

/// 作者或照片所有者可删除
async fn delete_comment(
    State(delivery): State<CommentDelivery>,
    caller: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let comment = delivery.comments.get(comment_id).await?;
    let photo_owner_id = delivery.photos.photo_owner(comment.photo_id).await?;

    delivery
        .comments
        .delete(DeleteComment {
            actor_id: caller.id,
            comment_id,
            photo_owner_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Your comment has been successfully deleted",
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::infrastructure::http::auth::TokenCodec;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Extension,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::util::ServiceExt;

    /// 记录调用次数，任何调用都视为失败
    #[derive(Default)]
    struct CountingComments {
        calls: AtomicUsize,
    }

    impl CountingComments {
        fn hit(&self) -> ApplicationError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ApplicationError::internal("comment store should not be reached")
        }
    }

    #[async_trait]
    impl CommentUseCase for CountingComments {
        async fn create(&self, _: CreateComment) -> Result<CommentRecord, ApplicationError> {
            Err(self.hit())
        }

        async fn list(&self, _: ListComments) -> Result<Vec<CommentWithAuthor>, ApplicationError> {
            Err(self.hit())
        }

        async fn get(&self, _: Uuid) -> Result<CommentRecord, ApplicationError> {
            Err(self.hit())
        }

        async fn update(&self, _: UpdateComment) -> Result<CommentRecord, ApplicationError> {
            Err(self.hit())
        }

        async fn delete(&self, _: DeleteComment) -> Result<(), ApplicationError> {
            Err(self.hit())
        }
    }

    /// 没有任何照片
    struct NoPhotos;

    #[async_trait]
    impl PhotoLookup for NoPhotos {
        async fn photo_exists(&self, _: Uuid) -> Result<bool, ApplicationError> {
            Ok(false)
        }

        async fn photo_owner(&self, _: Uuid) -> Result<Option<Uuid>, ApplicationError> {
            Ok(None)
        }
    }

    fn app(comments: Arc<CountingComments>) -> (axum::Router, String) {
        let mut registry = RouteRegistry::new();
        register(&mut registry, comments, Arc::new(NoPhotos)).unwrap();

        let codec = TokenCodec::new("test-secret", 3600).unwrap();
        let token = codec.issue(Uuid::new_v4(), "a@example.com").unwrap();
        let router = registry.into_router().layer(Extension(Arc::new(codec)));
        (router, token)
    }

    #[tokio::test]
    async fn test_comment_on_missing_photo_is_404_without_touching_store() {
        let comments = Arc::new(CountingComments::default());
        let (router, token) = app(comments.clone());

        let body = serde_json::json!({
            "photo_id": Uuid::new_v4().to_string(),
            "message": "hello",
        });
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/comments")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(comments.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_list_filtered_by_missing_photo_is_404() {
        let comments = Arc::new(CountingComments::default());
        let (router, token) = app(comments.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/comments?photo_id={}", Uuid::new_v4()))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(comments.calls.load(Ordering::SeqCst), 0);
    }
}

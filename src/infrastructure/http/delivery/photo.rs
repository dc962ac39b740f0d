//! Photo Delivery - `/photos`

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreatePhoto, DeletePhoto, UpdatePhoto};
use crate::application::{PhotoRecord, PhotoUseCase, PhotoWithOwner};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{parse_id, ApiJson, ApiResponse, MessageResponse, UserRef};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::registry::{ModuleRoutes, RouteConflict, RouteRegistry};

type PhotoState = Arc<dyn PhotoUseCase>;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub title: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub photo_url: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PhotoRecord> for PhotoResponse {
    fn from(photo: PhotoRecord) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: photo.created_at.to_rfc3339(),
            updated_at: photo.updated_at.to_rfc3339(),
        }
    }
}

/// 列表项：照片 + 所有者
#[derive(Debug, Serialize)]
pub struct PhotoListItem {
    #[serde(flatten)]
    pub photo: PhotoResponse,
    pub user: UserRef,
}

impl From<PhotoWithOwner> for PhotoListItem {
    fn from(item: PhotoWithOwner) -> Self {
        Self {
            photo: item.photo.into(),
            user: UserRef {
                id: None,
                username: item.owner.username,
                email: Some(item.owner.email),
            },
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// 挂载 Photo 模块路由
pub fn register(registry: &mut RouteRegistry, photos: PhotoState) -> Result<(), RouteConflict> {
    let routes = ModuleRoutes::new("photo", "/photos")
        .post("", create_photo)
        .get("", list_photos)
        .get("/:photo_id", get_photo)
        .put("/:photo_id", update_photo)
        .delete("/:photo_id", delete_photo);

    registry.mount(routes, photos)
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_photo(
    State(photos): State<PhotoState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<PhotoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let photo = photos
        .create(CreatePhoto {
            actor_id: caller.id,
            title: req.title,
            caption: req.caption,
            photo_url: req.photo_url,
        })
        .await?;

    Ok(ApiResponse::created(PhotoResponse::from(photo)))
}

async fn list_photos(
    State(photos): State<PhotoState>,
    _caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<PhotoListItem>>>, ApiError> {
    let items = photos.list().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(PhotoListItem::from).collect(),
    )))
}

async fn get_photo(
    State(photos): State<PhotoState>,
    _caller: AuthUser,
    Path(photo_id): Path<String>,
) -> Result<Json<ApiResponse<PhotoResponse>>, ApiError> {
    let photo_id = parse_id("Photo", &photo_id)?;
    let photo = photos.get(photo_id).await?;
    Ok(Json(ApiResponse::success(photo.into())))
}

/// 仅所有者可修改
async fn update_photo(
    State(photos): State<PhotoState>,
    caller: AuthUser,
    Path(photo_id): Path<String>,
    ApiJson(req): ApiJson<PhotoRequest>,
) -> Result<Json<ApiResponse<PhotoResponse>>, ApiError> {
    let photo_id = parse_id("Photo", &photo_id)?;
    let photo = photos
        .update(UpdatePhoto {
            actor_id: caller.id,
            photo_id,
            title: req.title,
            caption: req.caption,
            photo_url: req.photo_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(photo.into())))
}

async fn delete_photo(
    State(photos): State<PhotoState>,
    caller: AuthUser,
    Path(photo_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let photo_id = parse_id("Photo", &photo_id)?;
    photos
        .delete(DeletePhoto {
            actor_id: caller.id,
            photo_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Your photo has been successfully deleted",
    ))))
}

//! SocialMedia Delivery - `/socialmedias`

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateSocialMedia, DeleteSocialMedia, UpdateSocialMedia};
use crate::application::{SocialMediaRecord, SocialMediaUseCase, SocialMediaWithOwner};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{parse_id, ApiJson, ApiResponse, MessageResponse, UserRef};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::registry::{ModuleRoutes, RouteConflict, RouteRegistry};

type SocialMediaState = Arc<dyn SocialMediaUseCase>;

#[derive(Debug, Deserialize)]
pub struct SocialMediaRequest {
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Serialize)]
pub struct SocialMediaResponse {
    pub id: Uuid,
    pub name: String,
    pub social_media_url: String,
    pub user_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SocialMediaRecord> for SocialMediaResponse {
    fn from(record: SocialMediaRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            social_media_url: record.social_media_url,
            user_id: record.user_id,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaListItem {
    #[serde(flatten)]
    pub social_media: SocialMediaResponse,
    pub user: UserRef,
}

impl From<SocialMediaWithOwner> for SocialMediaListItem {
    fn from(item: SocialMediaWithOwner) -> Self {
        Self {
            social_media: item.social_media.into(),
            user: UserRef {
                id: Some(item.owner.id),
                username: item.owner.username,
                email: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaListResponse {
    pub social_medias: Vec<SocialMediaListItem>,
}

/// 挂载 SocialMedia 模块路由
pub fn register(
    registry: &mut RouteRegistry,
    social_medias: SocialMediaState,
) -> Result<(), RouteConflict> {
    let routes = ModuleRoutes::new("social_media", "/socialmedias")
        .post("", create_social_media)
        .get("", list_social_medias)
        .put("/:social_media_id", update_social_media)
        .delete("/:social_media_id", delete_social_media);

    registry.mount(routes, social_medias)
}

async fn create_social_media(
    State(social_medias): State<SocialMediaState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = social_medias
        .create(CreateSocialMedia {
            actor_id: caller.id,
            name: req.name,
            social_media_url: req.social_media_url,
        })
        .await?;

    Ok(ApiResponse::created(SocialMediaResponse::from(record)))
}

async fn list_social_medias(
    State(social_medias): State<SocialMediaState>,
    _caller: AuthUser,
) -> Result<Json<ApiResponse<SocialMediaListResponse>>, ApiError> {
    let items = social_medias.list().await?;
    Ok(Json(ApiResponse::success(SocialMediaListResponse {
        social_medias: items.into_iter().map(SocialMediaListItem::from).collect(),
    })))
}

async fn update_social_media(
    State(social_medias): State<SocialMediaState>,
    caller: AuthUser,
    Path(social_media_id): Path<String>,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> Result<Json<ApiResponse<SocialMediaResponse>>, ApiError> {
    let social_media_id = parse_id("SocialMedia", &social_media_id)?;
    let record = social_medias
        .update(UpdateSocialMedia {
            actor_id: caller.id,
            social_media_id,
            name: req.name,
            social_media_url: req.social_media_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

async fn delete_social_media(
    State(social_medias): State<SocialMediaState>,
    caller: AuthUser,
    Path(social_media_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let social_media_id = parse_id("SocialMedia", &social_media_id)?;
    social_medias
        .delete(DeleteSocialMedia {
            actor_id: caller.id,
            social_media_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Your social media has been successfully deleted",
    ))))
}

//! SocialMedia Commands

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateSocialMedia {
    pub actor_id: Uuid,
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Clone)]
pub struct UpdateSocialMedia {
    pub actor_id: Uuid,
    pub social_media_id: Uuid,
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Clone)]
pub struct DeleteSocialMedia {
    pub actor_id: Uuid,
    pub social_media_id: Uuid,
}

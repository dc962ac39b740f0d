//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 列表中附带的用户摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体（用于持久化）
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 新建用户；邮箱或用户名重复时返回 `Duplicate`
    async fn insert(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError>;

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// 更新邮箱与用户名
    async fn update(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 删除用户（级联删除其照片、评论、社交媒体）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Photo Repository
// ============================================================================

/// 照片实体（用于持久化）
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub id: Uuid,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 照片及其上传者
#[derive(Debug, Clone)]
pub struct PhotoWithOwner {
    pub photo: PhotoRecord,
    pub owner: UserSummary,
}

/// Photo Repository Port
#[async_trait]
pub trait PhotoRepositoryPort: Send + Sync {
    async fn insert(&self, photo: &PhotoRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PhotoRecord>, RepositoryError>;

    /// 获取所有照片（按创建时间倒序）
    async fn find_all_with_owner(&self) -> Result<Vec<PhotoWithOwner>, RepositoryError>;

    async fn update(&self, photo: &PhotoRecord) -> Result<(), RepositoryError>;

    /// 删除照片（级联删除其评论）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// 评论实体（用于持久化）
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub id: Uuid,
    pub message: String,
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 评论及其作者
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: CommentRecord,
    pub author: UserSummary,
}

/// Comment Repository Port
#[async_trait]
pub trait CommentRepositoryPort: Send + Sync {
    async fn insert(&self, comment: &CommentRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommentRecord>, RepositoryError>;

    /// 获取评论列表，可按照片过滤（按创建时间倒序）
    async fn find_all_with_author(
        &self,
        photo_id: Option<Uuid>,
    ) -> Result<Vec<CommentWithAuthor>, RepositoryError>;

    async fn update(&self, comment: &CommentRecord) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// SocialMedia Repository
// ============================================================================

/// 社交媒体实体（用于持久化）
#[derive(Debug, Clone)]
pub struct SocialMediaRecord {
    pub id: Uuid,
    pub name: String,
    pub social_media_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SocialMediaWithOwner {
    pub social_media: SocialMediaRecord,
    pub owner: UserSummary,
}

/// SocialMedia Repository Port
#[async_trait]
pub trait SocialMediaRepositoryPort: Send + Sync {
    async fn insert(&self, social_media: &SocialMediaRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SocialMediaRecord>, RepositoryError>;

    async fn find_all_with_owner(&self) -> Result<Vec<SocialMediaWithOwner>, RepositoryError>;

    async fn update(&self, social_media: &SocialMediaRecord) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

//! Photo Commands

use uuid::Uuid;

/// 上传照片命令
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub actor_id: Uuid,
    pub title: String,
    pub caption: Option<String>,
    pub photo_url: String,
}

/// 修改照片命令（仅所有者）
#[derive(Debug, Clone)]
pub struct UpdatePhoto {
    pub actor_id: Uuid,
    pub photo_id: Uuid,
    pub title: String,
    pub caption: Option<String>,
    pub photo_url: String,
}

/// 删除照片命令（仅所有者）
#[derive(Debug, Clone)]
pub struct DeletePhoto {
    pub actor_id: Uuid,
    pub photo_id: Uuid,
}

//! Comment Commands

use uuid::Uuid;

/// 发表评论命令
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub actor_id: Uuid,
    pub photo_id: Uuid,
    pub message: String,
}

/// 评论列表查询
#[derive(Debug, Clone, Default)]
pub struct ListComments {
    pub photo_id: Option<Uuid>,
}

/// 修改评论命令（仅作者）
#[derive(Debug, Clone)]
pub struct UpdateComment {
    pub actor_id: Uuid,
    pub comment_id: Uuid,
    pub message: String,
}

/// 删除评论命令
///
/// 作者或照片所有者均可删除；`photo_owner_id` 由调用方通过 `PhotoLookup` 取得
#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub actor_id: Uuid,
    pub comment_id: Uuid,
    pub photo_owner_id: Option<Uuid>,
}

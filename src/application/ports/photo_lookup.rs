//! Photo Lookup Port - 跨模块能力接口
//!
//! Comment 模块只能通过此接口询问 Photo 模块，
//! 不依赖 Photo 的具体类型，也接触不到 Photo 的仓储。

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::error::ApplicationError;

/// 照片存在性 / 归属查询
#[async_trait]
pub trait PhotoLookup: Send + Sync {
    /// 照片是否存在
    async fn photo_exists(&self, photo_id: Uuid) -> Result<bool, ApplicationError>;

    /// 照片上传者；照片不存在时返回 `None`
    async fn photo_owner(&self, photo_id: Uuid) -> Result<Option<Uuid>, ApplicationError>;
}

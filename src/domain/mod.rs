//! Domain Layer - 领域层
//!
//! 四个限界上下文，各自只包含值对象与校验规则:
//! - User: 注册信息
//! - Photo: 照片元数据
//! - Comment: 照片评论
//! - SocialMedia: 社交主页链接

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

mod shared;

pub use shared::ResourceUrl;

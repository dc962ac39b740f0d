//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层、以及模块之间的抽象接口

mod photo_lookup;
mod repositories;

pub use photo_lookup::PhotoLookup;
pub use repositories::{
    CommentRecord, CommentRepositoryPort, CommentWithAuthor, PhotoRecord, PhotoRepositoryPort,
    PhotoWithOwner, RepositoryError, SocialMediaRecord, SocialMediaRepositoryPort,
    SocialMediaWithOwner, UserRecord, UserRepositoryPort, UserSummary,
};

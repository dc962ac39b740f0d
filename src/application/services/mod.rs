//! UseCase 层 - 每个模块一个业务接口 + 一个实现
//!
//! 构造只做装配（持有仓储句柄），不做任何 I/O；业务错误在请求阶段产生

mod comment_service;
mod credentials;
mod photo_service;
mod social_media_service;
mod user_service;

pub use comment_service::{CommentService, CommentUseCase};
pub use credentials::{hash_password, verify_password};
pub use photo_service::{PhotoService, PhotoUseCase};
pub use social_media_service::{SocialMediaService, SocialMediaUseCase};
pub use user_service::{UserService, UserUseCase};

//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 仓储端口与跨模块能力接口（PhotoLookup）
//! - commands: 各模块用例的输入
//! - services: 各模块 UseCase 接口及实现
//! - error: 应用层（请求阶段）错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;

pub use ports::{
    CommentRecord, CommentRepositoryPort, CommentWithAuthor, PhotoLookup, PhotoRecord,
    PhotoRepositoryPort, PhotoWithOwner, RepositoryError, SocialMediaRecord,
    SocialMediaRepositoryPort, SocialMediaWithOwner, UserRecord, UserRepositoryPort, UserSummary,
};

pub use services::{
    CommentService, CommentUseCase, PhotoService, PhotoUseCase, SocialMediaService,
    SocialMediaUseCase, UserService, UserUseCase,
};

//! Delivery 层 - 各模块的 HTTP 入口
//!
//! 每个模块暴露一个 `register`，只向 `RouteRegistry` 追加自己前缀下的路由

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

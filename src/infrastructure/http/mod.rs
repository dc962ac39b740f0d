//! HTTP Layer - RESTful API
//!
//! 路由注册表、跨域与日志中间件、Bearer 认证、各模块 Delivery

pub mod auth;
pub mod delivery;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod server;

pub use auth::{AuthUser, TokenCodec, TokenError};
pub use error::ApiError;
pub use middleware::{cors_middleware, request_logging_middleware};
pub use registry::{ModuleRoutes, RouteConflict, RouteEntry, RouteRegistry};
pub use server::HttpServer;

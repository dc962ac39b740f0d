//! MyGram - 照片分享后端
//!
//! 架构设计: 分层 + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - User / Photo / Comment / SocialMedia 的值对象与校验规则
//!
//! 应用层 (application/):
//! - Ports: 仓储端口、跨模块能力接口 PhotoLookup
//! - Commands: 各模块用例输入
//! - Services: 各模块 UseCase
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: SQLite 仓储
//! - HTTP: 路由注册表、中间件、Bearer 认证、各模块 Delivery
//!
//! 组合根 (bootstrap/):
//! - 环境与配置加载、端口解析、模块组装、服务启动

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use bootstrap::{Application, StartupError};
pub use config::{load_config, AppConfig};

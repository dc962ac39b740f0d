//! 启动阶段错误
//!
//! 任一变体都是致命的：记录日志后以非零状态退出，不做重试

use thiserror::Error;

use crate::config::ConfigError;
use crate::infrastructure::http::RouteConflict;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Route conflict: {0}")]
    RouteConflict(#[from] RouteConflict),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl From<sqlx::Error> for StartupError {
    fn from(err: sqlx::Error) -> Self {
        StartupError::Database(err.to_string())
    }
}

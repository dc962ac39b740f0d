//! 应用层错误定义
//!
//! 请求阶段的可恢复错误：由 Delivery 层转换为 HTTP 响应，绝不终止进程

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突（如邮箱已注册）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 身份校验失败
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 非资源所有者
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        use crate::application::ports::RepositoryError;

        match err {
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            RepositoryError::NotFound(msg) => Self::NotFound {
                resource_type: "Entity",
                id: msg,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

//! User UseCase

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::credentials::{hash_password, verify_password};
use crate::application::commands::{DeleteUser, LoginUser, RegisterUser, UpdateUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::domain::user::{Age, Email, Password, Username};

/// User 模块业务接口
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// 注册新用户
    async fn register(&self, command: RegisterUser) -> Result<UserRecord, ApplicationError>;

    /// 校验邮箱密码，成功返回用户；令牌由 Delivery 层签发
    async fn login(&self, command: LoginUser) -> Result<UserRecord, ApplicationError>;

    async fn update(&self, command: UpdateUser) -> Result<UserRecord, ApplicationError>;

    async fn delete(&self, command: DeleteUser) -> Result<(), ApplicationError>;
}

/// User 模块业务实现
pub struct UserService {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserUseCase for UserService {
    async fn register(&self, command: RegisterUser) -> Result<UserRecord, ApplicationError> {
        let username = Username::new(&command.username).map_err(ApplicationError::validation)?;
        let email = Email::new(&command.email).map_err(ApplicationError::validation)?;
        let password = Password::new(command.password).map_err(ApplicationError::validation)?;
        let age = Age::new(command.age).map_err(ApplicationError::validation)?;

        if self.user_repo.find_by_email(email.as_str()).await?.is_some() {
            return Err(ApplicationError::Conflict(format!(
                "Email {} is already registered",
                email
            )));
        }

        let now = Utc::now();
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.into_inner(),
            email: email.into_inner(),
            password_hash: hash_password(password.expose())?,
            age: age.value(),
            created_at: now,
            updated_at: now,
        };

        // 用户名唯一性由数据库约束保证，冲突映射为 Conflict
        self.user_repo.insert(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginUser) -> Result<UserRecord, ApplicationError> {
        let invalid = || ApplicationError::unauthorized("Invalid email or password");

        let email = Email::new(&command.email).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&command.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(invalid());
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    async fn update(&self, command: UpdateUser) -> Result<UserRecord, ApplicationError> {
        let username = Username::new(&command.username).map_err(ApplicationError::validation)?;
        let email = Email::new(&command.email).map_err(ApplicationError::validation)?;

        let mut user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        user.username = username.into_inner();
        user.email = email.into_inner();
        user.updated_at = Utc::now();

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete(&self, command: DeleteUser) -> Result<(), ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        self.user_repo.delete(user.id).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User deleted");
        Ok(())
    }
}

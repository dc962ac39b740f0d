//! User Commands

use uuid::Uuid;

/// 注册用户命令
#[derive(Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i64,
}

/// 登录命令
#[derive(Clone)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// 更新当前用户命令
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

/// 删除当前用户命令
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub user_id: Uuid,
}

//! User Delivery - `/users`

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{DeleteUser, LoginUser, RegisterUser, UpdateUser};
use crate::application::UserUseCase;
use crate::infrastructure::http::auth::{AuthUser, TokenCodec};
use crate::infrastructure::http::dto::{ApiJson, ApiResponse, MessageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::registry::{ModuleRoutes, RouteConflict, RouteRegistry};

type UserState = Arc<dyn UserUseCase>;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub age: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub age: i64,
    pub updated_at: String,
}

// ============================================================================
// Routes
// ============================================================================

/// 挂载 User 模块路由
pub fn register(registry: &mut RouteRegistry, users: UserState) -> Result<(), RouteConflict> {
    let routes = ModuleRoutes::new("user", "/users")
        .post("/register", register_user)
        .post("/login", login)
        .put("", update_user)
        .delete("", delete_user);

    registry.mount(routes, users)
}

// ============================================================================
// Handlers
// ============================================================================

/// 注册
async fn register_user(
    State(users): State<UserState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user = users
        .register(RegisterUser {
            username: req.username,
            email: req.email,
            password: req.password,
            age: req.age,
        })
        .await?;

    Ok(ApiResponse::created(RegisterResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        age: user.age,
    }))
}

/// 登录并签发令牌
async fn login(
    State(users): State<UserState>,
    Extension(tokens): Extension<Arc<TokenCodec>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = users
        .login(LoginUser {
            email: req.email,
            password: req.password,
        })
        .await?;

    let token = tokens
        .issue(user.id, &user.email)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::success(LoginResponse { token })))
}

/// 修改当前用户
async fn update_user(
    State(users): State<UserState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UpdateUserResponse>>, ApiError> {
    let user = users
        .update(UpdateUser {
            user_id: caller.id,
            email: req.email,
            username: req.username,
        })
        .await?;

    Ok(Json(ApiResponse::success(UpdateUserResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        age: user.age,
        updated_at: user.updated_at.to_rfc3339(),
    })))
}

/// 删除当前用户
async fn delete_user(
    State(users): State<UserState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    users.delete(DeleteUser { user_id: caller.id }).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Your account has been successfully deleted",
    ))))
}

//! 模块组装
//!
//! 严格按 User → Photo → Comment → SocialMedia 的顺序构建
//! Repository → UseCase → Delivery，全部在绑定端口前完成

use std::sync::Arc;

use axum::{http::Uri, middleware, Extension, Router};
use tower_http::trace::TraceLayer;

use super::error::StartupError;
use crate::application::{
    CommentService, CommentUseCase, PhotoService, SocialMediaService, SocialMediaUseCase,
    UserService, UserUseCase,
};
use crate::infrastructure::http::{
    cors_middleware, delivery, request_logging_middleware, ApiError, RouteRegistry, TokenCodec,
};
use crate::infrastructure::persistence::sqlite::{
    DbPool, SqliteCommentRepository, SqlitePhotoRepository, SqliteSocialMediaRepository,
    SqliteUserRepository,
};

/// 构建四个模块并注册路由
pub fn compose_modules(pool: &DbPool) -> Result<RouteRegistry, StartupError> {
    let mut registry = RouteRegistry::new();

    // User
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let users: Arc<dyn UserUseCase> = Arc::new(UserService::new(user_repo));
    delivery::user::register(&mut registry, users)?;

    // Photo：同一个实例既是 PhotoUseCase，也是提供给 Comment 的 PhotoLookup
    let photo_repo = Arc::new(SqlitePhotoRepository::new(pool.clone()));
    let photos = Arc::new(PhotoService::new(photo_repo));
    delivery::photo::register(&mut registry, photos.clone())?;

    // Comment
    let comment_repo = Arc::new(SqliteCommentRepository::new(pool.clone()));
    let comments: Arc<dyn CommentUseCase> = Arc::new(CommentService::new(comment_repo));
    delivery::comment::register(&mut registry, comments, photos)?;

    // SocialMedia
    let social_media_repo = Arc::new(SqliteSocialMediaRepository::new(pool.clone()));
    let social_medias: Arc<dyn SocialMediaUseCase> =
        Arc::new(SocialMediaService::new(social_media_repo));
    delivery::social_media::register(&mut registry, social_medias)?;

    tracing::info!(routes = registry.routes().len(), "Modules composed");
    for entry in registry.routes() {
        tracing::debug!(route = %entry, "Route registered");
    }

    Ok(registry)
}

/// 挂载全局中间件，CORS 位于最外层
pub fn build_router(registry: RouteRegistry, tokens: Arc<TokenCodec>) -> Router {
    registry
        .into_router()
        .fallback(route_not_found)
        .layer(Extension(tokens))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors_middleware))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route not found: {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::{ModuleRoutes, RouteConflict};
    use crate::infrastructure::persistence::sqlite::memory_pool;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::collections::HashSet;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_routes_are_unique_and_prefixed() {
        let registry = compose_modules(&memory_pool().await).unwrap();

        let mut seen = HashSet::new();
        for entry in registry.routes() {
            assert!(
                seen.insert((entry.method.clone(), entry.path.clone())),
                "duplicate route {}",
                entry
            );

            let prefix = match entry.module {
                "user" => "/users",
                "photo" => "/photos",
                "comment" => "/comments",
                "social_media" => "/socialmedias",
                other => panic!("unexpected module {}", other),
            };
            assert!(entry.path.starts_with(prefix), "{} outside {}", entry, prefix);
        }

        let modules: HashSet<_> = registry.routes().iter().map(|e| e.module).collect();
        assert_eq!(modules.len(), 4);
    }

    #[tokio::test]
    async fn test_extra_registration_on_taken_route_fails() {
        let mut registry = compose_modules(&memory_pool().await).unwrap();

        async fn shadow() -> &'static str {
            "shadow"
        }
        let err = registry
            .mount(ModuleRoutes::new("rogue", "/photos/:photo_id").get("", shadow), ())
            .unwrap_err();
        assert!(matches!(err, RouteConflict::Duplicate { first: "photo", .. }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404_with_cors_headers() {
        let registry = compose_modules(&memory_pool().await).unwrap();
        let tokens = Arc::new(TokenCodec::new("test-secret", 60).unwrap());
        let router = build_router(registry, tokens);

        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errno"], 404);
    }
}

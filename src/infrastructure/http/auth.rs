//! Bearer 令牌
//!
//! HS256 签名的 JWT，载荷为 `{sub, email, exp}`，无状态校验。
//! `TokenCodec` 由组合根以 `Extension` 安装，`AuthUser` 提取器从中读取

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::error::ApiError;

/// 令牌载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    /// 过期时间（Unix 秒）
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token lifetime")]
    InvalidLifetime,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    Encode(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// 令牌签发与校验
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: u64) -> Result<Self, TokenError> {
        let ttl_secs = i64::try_from(ttl_secs).map_err(|_| TokenError::InvalidLifetime)?;
        let ttl = Duration::try_seconds(ttl_secs).ok_or(TokenError::InvalidLifetime)?;

        // 过期即拒绝，不留容差
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            validation,
            ttl,
        })
    }

    /// 为用户签发令牌
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: (now + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// 校验签名与过期时间并返回载荷
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

/// 已认证的调用者
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let codec = parts
            .extensions
            .get::<Arc<TokenCodec>>()
            .cloned()
            .ok_or_else(|| ApiError::Internal("Token codec is not installed".to_string()))?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = codec
            .verify(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Extension, Router,
    };
    use tower::util::ServiceExt;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", 3600).unwrap()
    }

    #[test]
    fn test_issued_token_verifies() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id, "a@example.com").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::hours(2);
        let token = codec
            .issue_at(Uuid::new_v4(), "a@example.com", issued_at)
            .unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = TokenCodec::new("other-secret", 3600)
            .unwrap()
            .issue(Uuid::new_v4(), "a@example.com")
            .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let victim = codec.issue(Uuid::new_v4(), "a@example.com").unwrap();
        let attacker = codec.issue(Uuid::new_v4(), "evil@example.com").unwrap();

        // 把另一张令牌的载荷拼到原签名上
        let victim_parts: Vec<&str> = victim.split('.').collect();
        let attacker_parts: Vec<&str> = attacker.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            victim_parts[0], attacker_parts[1], victim_parts[2]
        );

        assert_eq!(codec.verify(&forged), Err(TokenError::BadSignature));
        assert_eq!(codec.verify("no-dot-here"), Err(TokenError::Malformed));
    }

    async fn whoami(user: AuthUser) -> String {
        user.id.to_string()
    }

    fn app(codec: TokenCodec) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .layer(Extension(Arc::new(codec)))
    }

    #[tokio::test]
    async fn test_extractor_accepts_valid_bearer() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id, "a@example.com").unwrap();

        let response = app(codec)
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_header() {
        let response = app(codec())
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! HTTP Middleware
//!
//! - `cors_middleware`: 固定的跨域响应头，预检请求直接应答
//! - `request_logging_middleware`: 按状态码记录请求日志

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// 每个响应都携带的头部
const CORS_HEADERS: [(&str, &str); 6] = [
    ("content-type", "application/json"),
    ("access-control-allow-origin", "*"),
    ("access-control-max-age", "86400"),
    ("access-control-allow-methods", "POST, GET, PUT, DELETE, UPDATE"),
    (
        "access-control-allow-headers",
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, X-Max",
    ),
    ("access-control-allow-credentials", "true"),
];

fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// 跨域中间件
///
/// OPTIONS 请求返回 200 空响应，不进入后续处理；
/// 其余请求只调用一次后续处理，并在响应上覆盖写入固定头部
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

/// 请求日志中间件
///
/// 4xx 记为 warn，5xx 记为 error，其余为 debug
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP request"
        );
    }

    response
}

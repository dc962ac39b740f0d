//! HTTP Server
//!
//! 绑定监听地址并运行已组装好的 Router

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP 服务器
pub struct HttpServer {
    listener: TcpListener,
    router: Router,
}

impl HttpServer {
    /// 绑定监听地址；绑定失败即返回，不会开始服务
    pub async fn bind(addr: &str, router: Router) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        info!("HTTP server bound on {}", listener.local_addr()?);
        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> Result<std::net::SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

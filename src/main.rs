//! MyGram - 照片分享后端
//!
//! 启动顺序：命令行 → `.env` + 配置 → 日志 → 端口 → 组装 → 绑定并服务

use clap::Parser;

use mygram::bootstrap::{
    init_tracing, load_environment, resolve_port, Application, LoadedEnvironment,
};
use mygram::config::{print_config, LogConfig};

/// MyGram HTTP 服务
#[derive(Debug, Parser)]
#[command(name = "mygram", version, about)]
struct Cli {
    /// 监听端口（优先于 PORT 环境变量，默认 6969）
    port: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 配置必须在任何模块构建之前就绪
    let LoadedEnvironment { config, env_file } = match load_environment() {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing(&LogConfig::default());
            tracing::error!(error = %e, "Failed to load environment");
            return Err(e.into());
        }
    };

    init_tracing(&config.log);
    tracing::info!("MyGram starting");
    if let Some(path) = &env_file {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
    print_config(&config);

    let env_port = std::env::var("PORT").ok();
    let port = resolve_port(cli.port.as_deref(), env_port.as_deref());

    let app = match Application::build(&config, &port).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %app.addr(), "Starting HTTP server...");

    if let Err(e) = app.run_until(shutdown_signal()).await {
        tracing::error!(error = %e, "Server terminated");
        return Err(e.into());
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

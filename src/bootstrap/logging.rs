//! 日志初始化

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// 初始化全局 tracing subscriber
///
/// `RUST_LOG` 优先于配置中的日志级别；重复初始化时静默忽略
pub fn init_tracing(log: &LogConfig) {
    let default_filter = format!(
        "{},mygram={},tower_http=debug",
        log.level, log.level
    );
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}

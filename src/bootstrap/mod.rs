//! 组合根
//!
//! 加载环境与配置、建立连接池、组装四个模块、挂载全局中间件并启动 HTTP 服务。
//! 开始服务后不再参与请求处理

mod compose;
mod error;
mod logging;
mod port;

pub use compose::{build_router, compose_modules};
pub use error::StartupError;
pub use logging::init_tracing;
pub use port::{resolve_port, DEFAULT_PORT};

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;

use crate::config::{load_config_from_path, AppConfig, ConfigError};
use crate::infrastructure::http::{HttpServer, TokenCodec};
use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

/// 启动环境：配置及实际读取到的 `.env` 路径
#[derive(Debug)]
pub struct LoadedEnvironment {
    pub config: AppConfig,
    /// 未找到 `.env` 时为 `None`
    pub env_file: Option<PathBuf>,
}

/// 读取 `.env`（不存在时跳过）并加载配置
pub fn load_environment() -> Result<LoadedEnvironment, StartupError> {
    load_environment_from(None, None)
}

/// 从指定的 `.env` 与配置文件加载；`None` 时使用默认搜索路径
pub fn load_environment_from(
    env_file: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<LoadedEnvironment, StartupError> {
    let loaded = match env_file {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    let env_file = match loaded {
        Ok(path) => Some(path),
        Err(err) if err.not_found() => None,
        Err(err) => return Err(StartupError::Environment(err.to_string())),
    };

    let config = load_config_from_path(config_path)?;
    Ok(LoadedEnvironment { config, env_file })
}

/// 组装完成、尚未绑定端口的应用
pub struct Application {
    addr: String,
    router: Router,
}

impl Application {
    /// 建立连接池、执行迁移并组装全部模块
    pub async fn build(config: &AppConfig, port: &str) -> Result<Self, StartupError> {
        if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StartupError::Database(format!("Failed to create data dir: {}", e)))?;
        }

        let pool = create_pool(&DatabaseConfig {
            database_url: config.database.database_url(),
            max_connections: config.database.max_connections,
        })
        .await?;
        run_migrations(&pool).await?;
        tracing::info!(path = %config.database.path, "Database ready");

        let registry = compose_modules(&pool)?;

        let tokens = TokenCodec::new(&config.auth.secret, config.auth.token_ttl_secs)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(Self {
            addr: config.server.addr(port),
            router: build_router(registry, Arc::new(tokens)),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// 绑定端口并服务，直到 `shutdown` 完成
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let server = HttpServer::bind(&self.addr, self.router)
            .await
            .map_err(|source| StartupError::Bind {
                addr: self.addr.clone(),
                source,
            })?;

        server
            .run_with_shutdown(shutdown)
            .await
            .map_err(StartupError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, ttl_secs: u64) -> PathBuf {
        let path = dir.join("mygram.toml");
        fs::write(
            &path,
            format!(
                "[auth]\nsecret = \"file-secret\"\ntoken_ttl_secs = {}\n",
                ttl_secs
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_missing_env_file_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), 3600);

        let loaded =
            load_environment_from(Some(&dir.path().join(".env")), Some(&config_path)).unwrap();
        assert!(loaded.env_file.is_none());
        assert_eq!(loaded.config.auth.token_ttl_secs, 3600);
    }

    #[test]
    fn test_env_file_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), 3600);
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "MYGRAM_LOADED_ENV_MARKER=1\n").unwrap();

        let loaded = load_environment_from(Some(&env_path), Some(&config_path)).unwrap();
        assert_eq!(loaded.env_file.as_deref(), Some(env_path.as_path()));
    }

    #[test]
    fn test_malformed_env_file_is_environment_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), 3600);
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "this line has no equals sign\n").unwrap();

        let err = load_environment_from(Some(&env_path), Some(&config_path)).unwrap_err();
        assert!(matches!(err, StartupError::Environment(_)), "got {:?}", err);
    }

    #[test]
    fn test_invalid_config_surfaces_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path(), 0);

        let err =
            load_environment_from(Some(&dir.path().join(".env")), Some(&config_path)).unwrap_err();
        assert!(
            matches!(err, StartupError::Config(ConfigError::ValidationError(_))),
            "got {:?}",
            err
        );
    }

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.database.path = dir.join("nested/mygram.db").display().to_string();
        config.auth.secret = "test-secret".to_string();
        config
    }

    #[tokio::test]
    async fn test_build_creates_database_and_serves() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let app = Application::build(&config, "0").await.unwrap();
        assert_eq!(app.addr(), "127.0.0.1:0");
        assert!(dir.path().join("nested/mygram.db").exists());

        app.run_until(async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_port_fails_at_bind() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let app = Application::build(&config, "not-a-port").await.unwrap();
        let err = app.run_until(async {}).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}

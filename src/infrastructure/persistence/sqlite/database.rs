//! SQLite Database - 数据库连接和迁移

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::RepositoryError;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库 URL
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/mygram.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    /// 内存数据库：单连接，否则每个连接各自一份数据
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池（进程内唯一的持久化句柄）
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
///
/// 连接级 PRAGMA 通过 connect options 设置，保证池中每个连接都生效
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(5000));

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
    if config.database_url.contains(":memory:") {
        // 内存库随连接关闭而丢失
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;

    tracing::info!(
        max_connections = config.max_connections,
        "SQLite pool created with WAL mode and foreign keys enabled"
    );

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            age INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            caption TEXT NOT NULL DEFAULT '',
            photo_url TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            message TEXT NOT NULL,
            photo_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (photo_id) REFERENCES photos(id) ON DELETE CASCADE,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS social_medias (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            social_media_url TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 外键列索引（级联删除与列表过滤）
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_photos_user_id ON photos(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_comments_photo_id ON comments(photo_id)",
        "CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_social_medias_user_id ON social_medias(user_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database migrations completed");
    Ok(())
}

// ============================================================================
// Row helpers
// ============================================================================

/// 时间戳统一为微秒精度，保证按字符串排序即按时间排序
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

/// 将 sqlx 错误映射为仓储错误
///
/// 唯一约束冲突 → `Duplicate`，外键不存在 → `NotFound`
pub(crate) fn map_db_error(entity: &str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Duplicate(format!("{}: {}", entity, db_err.message()));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::NotFound(format!("{} references a missing entity", entity));
        }
    }
    RepositoryError::DatabaseError(err.to_string())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// 测试用：直接写入一个用户，返回其 ID
#[cfg(test)]
pub(crate) async fn seed_user(pool: &DbPool, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    let now = format_timestamp(Utc::now());
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, age, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(username)
    .bind(format!("{}@example.com", username))
    .bind("$argon2id$fake")
    .bind(20_i64)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap();
    id
}

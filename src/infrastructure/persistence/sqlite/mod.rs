//! SQLite Persistence - SQLite 数据库持久化实现

mod comment_repo;
mod database;
mod photo_repo;
mod social_media_repo;
mod user_repo;

pub use comment_repo::*;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use photo_repo::*;
pub use social_media_repo::*;
pub use user_repo::*;

#[cfg(test)]
pub(crate) use database::{memory_pool, seed_user};

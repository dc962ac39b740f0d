//! Persistence Layer - 数据持久化
//!
//! 四个模块的 Repository 均基于同一个 SQLite 连接池

pub mod sqlite;

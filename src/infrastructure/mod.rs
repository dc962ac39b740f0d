//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及 HTTP 入口

pub mod http;
pub mod persistence;

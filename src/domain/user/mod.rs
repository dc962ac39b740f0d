//! User Context - 用户限界上下文
//!
//! 职责:
//! - 注册信息校验（邮箱、用户名、密码、年龄）
//! - 为其它上下文提供资源归属者身份

mod value_objects;

pub use value_objects::{Age, Email, Password, Username, MIN_AGE, MIN_PASSWORD_LEN};

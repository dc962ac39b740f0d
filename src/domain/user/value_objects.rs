//! User Context - Value Objects

use email_address::EmailAddress;
use std::str::FromStr;

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

/// 密码最大长度（字节），限制单次哈希的输入规模
pub const MAX_PASSWORD_LEN: usize = 72;

/// 注册年龄下限（必须大于 8 岁）
pub const MIN_AGE: i64 = 9;

/// 邮箱地址（已规范化为小写）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, &'static str> {
        let email = email.as_ref().trim().to_lowercase();
        if email.is_empty() {
            return Err("Email is required");
        }
        if EmailAddress::from_str(&email).is_err() {
            return Err("Invalid email format");
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(username: impl AsRef<str>) -> Result<Self, &'static str> {
        let username = username.as_ref().trim();
        if username.is_empty() {
            return Err("Username is required");
        }
        if username.chars().count() > 50 {
            return Err("Username must not exceed 50 characters");
        }
        Ok(Self(username.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 明文密码（只在注册/登录流程中短暂存在）
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Result<Self, &'static str> {
        let password = password.into();
        if password.is_empty() {
            return Err("Password is required");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters");
        }
        if password.len() > MAX_PASSWORD_LEN {
            return Err("Password must not exceed 72 bytes");
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// 年龄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i64);

impl Age {
    pub fn new(age: i64) -> Result<Self, &'static str> {
        if age < MIN_AGE {
            return Err("Age must be above 8");
        }
        if age > 150 {
            return Err("Age is out of range");
        }
        Ok(Self(age))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_rejects_garbage() {
        assert!(Email::new("").is_err());
        assert!(Email::new("not-an-email").is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(Username::new("   ").is_err());
        assert!(Username::new("a".repeat(51)).is_err());
        assert_eq!(Username::new(" alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_password_length() {
        assert!(Password::new("12345").is_err());
        assert!(Password::new("123456").is_ok());
        assert!(Password::new("x".repeat(73)).is_err());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret-value").unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_age_must_be_above_eight() {
        assert!(Age::new(8).is_err());
        assert_eq!(Age::new(9).unwrap().value(), 9);
        assert!(Age::new(200).is_err());
    }
}

//! 密码哈希
//!
//! Argon2id，参数: m_cost = 19 MiB, t_cost = 2, p_cost = 1

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};

use crate::application::error::ApplicationError;

fn argon2() -> Result<Argon2<'static>, ApplicationError> {
    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|e| ApplicationError::internal(format!("Failed to build Argon2 params: {}", e)))?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// 生成 PHC 格式的密码哈希
pub fn hash_password(password: &str) -> Result<String, ApplicationError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApplicationError::internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// 校验密码；哈希格式损坏视为内部错误
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApplicationError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApplicationError::internal("Invalid password hash format"))?;

    // 参数从 PHC 字符串中读取
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

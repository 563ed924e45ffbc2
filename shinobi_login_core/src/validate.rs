//! 登录表单校验

use crate::error::{Error, Result};
use crate::types::Credentials;

/// 服务器地址校验：非空即有效
pub fn server_is_valid(server: &str) -> bool {
    !server.is_empty()
}

/// 邮箱校验：包含 `@` 即有效（不做完整 RFC 校验）
pub fn email_is_valid(email: &str) -> bool {
    email.contains('@')
}

/// 密码校验：非空即有效
pub fn password_is_valid(password: &str) -> bool {
    !password.is_empty()
}

impl Credentials {
    /// 按 服务器 → 邮箱 → 密码 的顺序校验，报告首个无效字段后立即返回
    pub fn validate(&self) -> Result<()> {
        if !server_is_valid(&self.server) {
            return Err(Error::InvalidServer);
        }
        if !email_is_valid(&self.email) {
            return Err(Error::InvalidEmail);
        }
        if !password_is_valid(&self.password) {
            return Err(Error::InvalidPassword);
        }
        Ok(())
    }
}

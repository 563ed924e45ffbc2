//! 数据类型定义

use serde::{Deserialize, Serialize};

/// 登录请求的 `function` 字段固定值
pub const LOGIN_FUNCTION: &str = "dash";

/// 登录表单凭证（每次登录临时创建，不持久化）
#[derive(Debug, Clone)]
pub struct Credentials {
    /// 服务器地址（host 或 host:port，不含 scheme）
    pub server: String,
    /// 是否使用 https
    pub use_tls: bool,
    pub email: String,
    pub password: String,
}

/// 登录请求体
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub mail: String,
    pub pass: String,
    pub function: String,
}

impl LoginRequest {
    /// 构造登录请求，`function` 固定为 `"dash"`
    pub fn new(mail: &str, pass: &str) -> Self {
        Self {
            mail: mail.to_string(),
            pass: pass.to_string(),
            function: LOGIN_FUNCTION.to_string(),
        }
    }
}

/// 登录响应体，用户对象嵌套在字面量 `$user` 键下
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "$user")]
    pub user: Option<User>,
}

/// 用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub ok: bool,
    pub auth_token: String,
    pub ke: String,
    pub uid: String,
}

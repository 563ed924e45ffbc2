//! 错误类型定义

use thiserror::Error;

/// 错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 服务器地址为空
    #[error("Invalid server address")]
    InvalidServer,

    /// 邮箱格式错误
    #[error("Invalid email address")]
    InvalidEmail,

    /// 密码为空
    #[error("Invalid password")]
    InvalidPassword,

    /// 网络/HTTP 层失败（连接失败、非 2xx 状态码、响应体解析失败）
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// 服务器已响应但未返回用户（凭证被拒绝）
    ///
    /// 注意：历史上 UI 层将 [`Error::RequestFailed`] 与本错误统一显示为
    /// "incorrect password"。API 层保留区分，是否合并由展示层决定。
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// 结果类型
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::InvalidServer.to_string(), "Invalid server address");
        assert_eq!(
            Error::RequestFailed("connection refused".to_string()).to_string(),
            "Request failed: connection refused"
        );
        assert_eq!(Error::InvalidCredentials.to_string(), "Invalid credentials");
    }
}

//! Shinobi 登录客户端

use crate::error::{Error, Result};
use crate::types::{LoginRequest, LoginResponse, User};
use reqwest::Client;
use tracing::{debug, info, warn};

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 服务器地址（host 或 host:port，不含 scheme）
    pub server: String,
    /// 是否使用 https
    pub use_tls: bool,
    /// 请求超时（秒）。原始行为没有超时，此处作为文档化的扩展引入
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: "127.0.0.1:8080".to_string(),
            use_tls: false,
            timeout: 30,
        }
    }
}

impl ClientConfig {
    /// 根据 `use_tls` 拼接基础 URL：`{https|http}://{server}`
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}", scheme, self.server)
    }
}

/// Shinobi 登录客户端
pub struct ShinobiClient {
    config: ClientConfig,
    http_client: Client,
}

impl ShinobiClient {
    /// 创建新的客户端实例
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// 使用默认超时创建客户端
    pub fn with_server(server: &str, use_tls: bool) -> Result<Self> {
        let config = ClientConfig {
            server: server.to_string(),
            use_tls,
            ..ClientConfig::default()
        };
        Self::new(config)
    }

    /// 用户登录
    ///
    /// 向 `{base_url}/?json=true` 发送一次 POST，请求体为
    /// `{"mail": ..., "pass": ..., "function": "dash"}`。
    ///
    /// - 传输失败或非 2xx 状态码返回 [`Error::RequestFailed`]
    /// - HTTP 成功但 `$user` 缺失或为 null 返回 [`Error::InvalidCredentials`]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        info!("Logging in to {}", self.config.server);

        let url = format!("{}/?json=true", self.config.base_url());
        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest::new(email, password))
            .send()
            .await
            .map_err(|e| Error::RequestFailed(format!("Failed to connect to {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Login request to {} failed with HTTP {}", url, status);
            return Err(Error::RequestFailed(format!("HTTP {} from {}", status, url)));
        }

        let login_response: LoginResponse = response
            .json()
            .await
            .map_err(|e| Error::RequestFailed(format!("Failed to parse response from {}: {}", url, e)))?;

        // 成功的唯一判据：响应里存在非 null 的 $user 对象
        let user = login_response.user.ok_or(Error::InvalidCredentials)?;

        debug!("Login succeeded for uid {}", user.uid);
        Ok(user)
    }

    /// 获取客户端配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

//! Shinobi 登录客户端核心库
//!
//! 提供 Shinobi NVR 服务器的登录客户端实现，包括：
//! - 登录表单校验（服务器地址 / 邮箱 / 密码）
//! - 认证请求（POST `/?json=true`，JSON 凭证）
//! - 面向 UI 的单飞行登录流程（提交 / 轮询 / 取消）

pub mod client;
pub mod error;
pub mod flow;
pub mod types;
pub mod validate;

pub use client::{ClientConfig, ShinobiClient};
pub use error::{Error, Result};
pub use flow::{LoginFlow, LoginOutcome, LoginState};
pub use types::*;

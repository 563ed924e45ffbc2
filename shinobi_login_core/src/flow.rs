//! 登录流程状态机
//!
//! 面向 UI 的单飞行（single-flight）登录流程：同一时刻最多一个进行中的
//! 登录请求，第二次提交被丢弃而非排队。请求在 tokio 任务中执行，完成结果
//! 通过 mpsc 通道投递回轮询方所在的线程。

use crate::client::ShinobiClient;
use crate::error::{Error, Result};
use crate::types::{Credentials, User};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// 登录流程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// 空闲，可以提交
    Idle,
    /// 有请求在飞行中（UI 层的 "loading" 布尔状态）
    Submitting,
}

/// 登录完成结果
#[derive(Debug)]
pub enum LoginOutcome {
    Succeeded(User),
    Failed(Error),
}

/// 登录流程
///
/// 用显式状态标志加任务句柄实现单飞行约束，取消时中止任务且不投递结果。
/// [`LoginFlow::submit`] 需要在 tokio 运行时内调用。
pub struct LoginFlow {
    task: Option<JoinHandle<()>>,
    outcome_rx: Option<mpsc::Receiver<LoginOutcome>>,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    /// 创建空闲状态的登录流程
    pub fn new() -> Self {
        Self {
            task: None,
            outcome_rx: None,
        }
    }

    /// 当前状态
    pub fn state(&self) -> LoginState {
        if self.task.is_some() {
            LoginState::Submitting
        } else {
            LoginState::Idle
        }
    }

    /// 是否有请求在飞行中
    pub fn is_submitting(&self) -> bool {
        self.state() == LoginState::Submitting
    }

    /// 提交一次登录
    ///
    /// - 表单校验失败：返回对应字段的错误，不发送请求，状态保持空闲
    /// - 已有请求在飞行中：返回 `Ok(false)`，本次提交被丢弃，
    ///   进行中的请求不受影响
    /// - 否则发起请求并返回 `Ok(true)`，状态进入 Submitting
    pub fn submit(&mut self, credentials: Credentials) -> Result<bool> {
        if self.is_submitting() {
            debug!("Login already in flight, dropping attempt");
            return Ok(false);
        }

        credentials.validate()?;

        let client = ShinobiClient::with_server(&credentials.server, credentials.use_tls)?;
        let (tx, rx) = mpsc::channel(1);

        info!("Submitting login for {}", credentials.email);
        let task = tokio::spawn(async move {
            let outcome = match client.login(&credentials.email, &credentials.password).await {
                Ok(user) => LoginOutcome::Succeeded(user),
                Err(e) => LoginOutcome::Failed(e),
            };
            let _ = tx.send(outcome).await;
        });

        self.task = Some(task);
        self.outcome_rx = Some(rx);
        Ok(true)
    }

    /// 非阻塞地取出完成结果
    ///
    /// 取到结果后流程回到空闲状态，可以再次提交。
    pub fn poll_outcome(&mut self) -> Option<LoginOutcome> {
        let rx = self.outcome_rx.as_mut()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.task = None;
                self.outcome_rx = None;
                Some(outcome)
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            // 发送端已消失（任务被中止或异常退出），回到空闲
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.task = None;
                self.outcome_rx = None;
                None
            }
        }
    }

    /// 等待完成结果（异步调用方使用；UI 轮询方使用 [`LoginFlow::poll_outcome`]）
    pub async fn recv_outcome(&mut self) -> Option<LoginOutcome> {
        let rx = self.outcome_rx.as_mut()?;
        let outcome = rx.recv().await;
        self.task = None;
        self.outcome_rx = None;
        outcome
    }

    /// 取消飞行中的请求
    ///
    /// Submitting -> Idle，中止任务，不投递任何结果。空闲时调用无副作用。
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            info!("Cancelling in-flight login");
            task.abort();
        }
        self.outcome_rx = None;
    }
}

impl Drop for LoginFlow {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flow_is_idle() {
        let flow = LoginFlow::new();
        assert_eq!(flow.state(), LoginState::Idle);
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form_without_state_change() {
        let mut flow = LoginFlow::new();
        let result = flow.submit(Credentials {
            server: "host".to_string(),
            use_tls: false,
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        });
        assert!(matches!(result, Err(Error::InvalidEmail)));
        assert_eq!(flow.state(), LoginState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_on_idle_flow_is_noop() {
        let mut flow = LoginFlow::new();
        flow.cancel();
        assert_eq!(flow.state(), LoginState::Idle);
        assert!(flow.poll_outcome().is_none());
    }
}

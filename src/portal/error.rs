//! 门户 SDK 错误类型
//!
//! 四类错误：缺少凭证、认证被拒（401）、本地校验失败、服务器/网络错误。
//! 所有错误都不会自动重试。

use thiserror::Error;

/// 未提供服务器消息时的通用提示
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// 门户 SDK 统一错误
#[derive(Debug, Error)]
pub enum PortalError {
    /// 本地没有存储 token，直接阻止请求
    #[error("Authentication token not found")]
    MissingToken,

    /// 服务器返回 401 或消息中包含 "401"，附带服务器给出的提示（可能为空）
    #[error("session rejected (401): {}", .0.as_deref().unwrap_or("<no message>"))]
    Unauthorized(Option<String>),

    /// 本地校验失败（密码不一致、验证码不完整等），不发请求
    #[error("{0}")]
    Validation(String),

    /// 服务器返回非 2xx（401 除外），message 为服务器给出的提示（可能为空）
    #[error("server error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// 请求发送失败或读取 body 失败
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 响应格式不符合预期
    #[error("malformed response: {0}")]
    Decode(String),

    /// 本地存储读写失败
    #[error("storage error: {0}")]
    Storage(String),
}

impl PortalError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PortalError::Unauthorized(_))
    }

    /// 面向用户的提示：优先使用服务器消息，否则使用 fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            PortalError::Server {
                message: Some(msg), ..
            }
            | PortalError::Unauthorized(Some(msg))
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            PortalError::Validation(msg) => msg.clone(),
            PortalError::MissingToken => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<sqlx::Error> for PortalError {
    fn from(e: sqlx::Error) -> Self {
        PortalError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::Decode(e.to_string())
    }
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;

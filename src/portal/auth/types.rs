//! 认证 API DTO（请求和响应结构体）

use crate::portal::error::{PortalError, PortalResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 注册请求。密码以明文 JSON 经 HTTPS 发送，由服务器负责哈希
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthRequest {
    pub code: String,
}

/// 登录/注册/OAuth 的统一响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    /// 页面标识
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 注册表单
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// 显示名称：名和姓各自去掉首尾空白后拼接
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// 本地校验，通过后生成请求体
    pub fn validate(&self) -> PortalResult<SignupRequest> {
        if self.email.trim().is_empty() {
            return Err(PortalError::Validation("Email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(PortalError::Validation("Password is required".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(PortalError::Validation("Passwords do not match".to_string()));
        }
        Ok(SignupRequest {
            name: self.display_name(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

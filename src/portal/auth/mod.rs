//! 凭证交换模块
//!
//! 登录、注册和 Google OAuth 授权码交换：成功后保存 token 并按路由表跳转。

pub mod api;
pub mod service;
pub mod types;

pub use api::AuthApi;
pub use service::CredentialExchange;
pub use types::{AuthResponse, GoogleAuthRequest, LoginRequest, SignupForm, SignupRequest};

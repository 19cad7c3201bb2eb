//! 认证 HTTP API 客户端

use crate::portal::auth::types::{AuthResponse, GoogleAuthRequest, LoginRequest, SignupRequest};
use crate::portal::client::{endpoints, PortalClient};
use crate::portal::error::PortalResult;
use crate::portal::types::handle_http_response;
use tracing::{debug, info};

pub struct AuthApi {
    client: PortalClient,
}

impl AuthApi {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, req: &LoginRequest) -> PortalResult<AuthResponse> {
        info!("[AuthAPI] 🔐 正在登录...");
        debug!("[AuthAPI]   邮箱: {}", req.email);
        let response = self
            .client
            .public_post(endpoints::LOGIN)
            .json(req)
            .send()
            .await?;
        handle_http_response(response, "登录").await
    }

    pub async fn signup(&self, req: &SignupRequest) -> PortalResult<AuthResponse> {
        info!("[AuthAPI] 📝 正在注册...");
        debug!("[AuthAPI]   邮箱: {}, 名称: {}", req.email, req.name);
        let response = self
            .client
            .public_post(endpoints::SIGNUP)
            .json(req)
            .send()
            .await?;
        handle_http_response(response, "注册").await
    }

    pub async fn google(&self, req: &GoogleAuthRequest) -> PortalResult<AuthResponse> {
        info!("[AuthAPI] 🔐 正在交换 Google 授权码...");
        let response = self
            .client
            .public_post(endpoints::GOOGLE_AUTH)
            .json(req)
            .send()
            .await?;
        handle_http_response(response, "Google 登录").await
    }
}

//! 会话检查 HTTP API

use crate::portal::client::{endpoints, PortalClient};
use crate::portal::error::PortalResult;
use crate::portal::types::handle_http_response;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionCheckResponse {
    /// 页面标识
    #[serde(default)]
    pub page: Option<String>,
}

pub struct SessionApi {
    client: PortalClient,
}

impl SessionApi {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    pub async fn check_session(&self, token: &str) -> PortalResult<SessionCheckResponse> {
        info!("[SessionAPI] 📡 请求会话检查");
        let response = self
            .client
            .authed_with(reqwest::Method::GET, endpoints::CHECK_SESSION, token)
            .send()
            .await?;
        handle_http_response(response, "会话检查").await
    }
}

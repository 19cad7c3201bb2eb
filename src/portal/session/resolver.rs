//! 会话解析器

use crate::portal::client::PortalClient;
use crate::portal::context::ViewScope;
use crate::portal::error::PortalError;
use crate::portal::routing::{PageId, Route};
use crate::portal::session::api::SessionApi;
use tracing::{error, info, warn};

/// 会话解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 本地没有 token，停留在当前（公开）页面，未发请求
    NoToken,
    /// 已按路由表跳转
    Routed(Route),
    /// 页面标识未知，停留在当前页面
    UnknownPage(String),
    /// 会话失效（401），token 已删除
    Expired,
    /// 其他失败，token 保留
    Failed(String),
}

pub struct SessionResolver {
    client: PortalClient,
    api: SessionApi,
}

impl SessionResolver {
    pub fn new(client: PortalClient) -> Self {
        Self {
            api: SessionApi::new(client.clone()),
            client,
        }
    }

    pub async fn resolve(&self, scope: &ViewScope) -> SessionOutcome {
        let ctx = self.client.context();
        let token = match ctx.token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("[Session] 本地没有 token，停留在 {}", scope.name());
                return SessionOutcome::NoToken;
            }
            Err(e) => {
                error!("[Session] ❌ 读取 token 失败: {}", e);
                return SessionOutcome::Failed(e.to_string());
            }
        };

        match self.api.check_session(&token).await {
            Ok(resp) => {
                let Some(raw) = resp.page else {
                    warn!("[Session] 响应缺少 page 字段，停留在当前页面");
                    return SessionOutcome::Failed("响应缺少 page 字段".to_string());
                };
                match PageId::parse(&raw).route() {
                    Some(route) => {
                        info!("[Session] ✅ 会话有效，页面标识: {}", raw);
                        ctx.navigate(scope, route.clone()).await;
                        SessionOutcome::Routed(route)
                    }
                    None => {
                        warn!("[Session] ⚠️ 未知页面标识: {}，停留在当前页面", raw);
                        SessionOutcome::UnknownPage(raw)
                    }
                }
            }
            Err(e @ PortalError::Unauthorized(_)) => {
                warn!("[Session] 🔒 会话已失效: {}", e);
                if let Err(e) = ctx.storage().clear_token().await {
                    error!("[Session] ❌ 删除 token 失败: {}", e);
                }
                SessionOutcome::Expired
            }
            Err(e) => {
                // 失败原因不明确，不删除 token
                error!("[Session] ❌ 会话检查失败: {}", e);
                SessionOutcome::Failed(e.to_string())
            }
        }
    }
}

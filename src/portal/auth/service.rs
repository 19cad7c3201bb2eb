//! 凭证交换服务层

use crate::portal::auth::api::AuthApi;
use crate::portal::auth::types::{AuthResponse, GoogleAuthRequest, LoginRequest, SignupForm};
use crate::portal::client::PortalClient;
use crate::portal::context::ViewScope;
use crate::portal::error::{PortalError, PortalResult, FALLBACK_ERROR_MESSAGE};
use crate::portal::listener::Notification;
use crate::portal::routing::{PageId, Route};
use tracing::{error, info, warn};

/// 登录、注册、OAuth 共用的成功处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Login,
    Signup,
    Google,
}

impl Flow {
    fn success_message(self) -> &'static str {
        match self {
            Flow::Login => "Login successful!",
            Flow::Signup => "Account created successfully!",
            Flow::Google => "Signed in with Google!",
        }
    }
}

pub struct CredentialExchange {
    client: PortalClient,
    api: AuthApi,
}

impl CredentialExchange {
    pub fn new(client: PortalClient) -> Self {
        Self {
            api: AuthApi::new(client.clone()),
            client,
        }
    }

    /// 邮箱密码登录，返回跳转的目标页面
    pub async fn login(&self, scope: &ViewScope, email: &str, password: &str) -> PortalResult<Route> {
        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&req).await;
        self.complete(scope, Flow::Login, result).await
    }

    /// 注册；密码不一致时不发请求
    pub async fn signup(&self, scope: &ViewScope, form: &SignupForm) -> PortalResult<Route> {
        let req = match form.validate() {
            Ok(req) => req,
            Err(e) => {
                warn!("[Auth] 注册表单校验失败: {}", e);
                self.client
                    .context()
                    .notify(scope, Notification::error(e.to_string()))
                    .await;
                return Err(e);
            }
        };
        let result = self.api.signup(&req).await;
        self.complete(scope, Flow::Signup, result).await
    }

    /// 提交 OAuth 回调得到的授权码
    pub async fn google_exchange(&self, scope: &ViewScope, code: &str) -> PortalResult<Route> {
        if code.trim().is_empty() {
            let e = PortalError::Validation("Missing authorization code".to_string());
            self.client
                .context()
                .notify(scope, Notification::error(e.to_string()))
                .await;
            return Err(e);
        }
        let req = GoogleAuthRequest {
            code: code.to_string(),
        };
        let result = self.api.google(&req).await;
        self.complete(scope, Flow::Google, result).await
    }

    async fn complete(
        &self,
        scope: &ViewScope,
        flow: Flow,
        result: PortalResult<AuthResponse>,
    ) -> PortalResult<Route> {
        let ctx = self.client.context();
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!("[Auth] ❌ {:?} 失败: {}", flow, e);
                ctx.notify(scope, Notification::error(e.user_message(FALLBACK_ERROR_MESSAGE)))
                    .await;
                return Err(e);
            }
        };

        let Some(token) = resp.token.filter(|t| !t.is_empty()) else {
            error!("[Auth] ❌ {:?} 响应缺少 token", flow);
            let e = PortalError::Server {
                status: 200,
                message: resp.message,
            };
            ctx.notify(scope, Notification::error(e.user_message(FALLBACK_ERROR_MESSAGE)))
                .await;
            return Err(e);
        };

        if let Err(e) = self.persist(flow, &token).await {
            error!("[Auth] ❌ {:?} 保存 token 失败: {}", flow, e);
            ctx.notify(scope, Notification::error(e.user_message(FALLBACK_ERROR_MESSAGE)))
                .await;
            return Err(e);
        }

        ctx.notify(scope, Notification::success(flow.success_message()))
            .await;

        let route = match resp.page.as_deref().map(PageId::parse) {
            Some(page) => page.route().unwrap_or_else(|| {
                warn!("[Auth] ⚠️ 未知页面标识: {:?}，跳转到首页", page);
                Route::Root
            }),
            None => {
                warn!("[Auth] ⚠️ 响应缺少页面标识，跳转到首页");
                Route::Root
            }
        };
        info!("[Auth] ✅ {:?} 成功，目标页面: {}", flow, route);
        ctx.navigate(scope, route.clone()).await;
        Ok(route)
    }

    async fn persist(&self, flow: Flow, token: &str) -> PortalResult<()> {
        let storage = self.client.context().storage();
        storage.store_token(token).await?;
        if flow == Flow::Signup {
            storage.mark_signup().await?;
        }
        Ok(())
    }
}

//! 验证码页面状态与提交逻辑

use crate::portal::client::PortalClient;
use crate::portal::context::ViewScope;
use crate::portal::error::{PortalError, PortalResult, FALLBACK_ERROR_MESSAGE};
use crate::portal::listener::Notification;
use crate::portal::otp::api::OtpApi;
use crate::portal::otp::cells::OtpCells;
use crate::portal::otp::cooldown::{CountdownHandle, ResendCooldown};
use crate::portal::routing::Route;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    /// 尚未提交
    Pending,
    /// 上次提交失败，可以重试
    Failed,
    /// 验证完成（终态）
    Verified,
}

pub struct OtpVerifier {
    client: PortalClient,
    api: OtpApi,
    cells: OtpCells,
    cooldown: ResendCooldown,
    ticker: Option<CountdownHandle>,
    state: VerificationState,
}

impl OtpVerifier {
    pub fn new(client: PortalClient) -> Self {
        Self {
            api: OtpApi::new(client.clone()),
            client,
            cells: OtpCells::new(),
            cooldown: ResendCooldown::new(),
            ticker: None,
            state: VerificationState::Pending,
        }
    }

    /// 启动冷却倒计时（页面挂载时调用），页面卸载时随 `OtpVerifier` 一起停止
    pub fn start_countdown(&mut self) {
        if self.ticker.is_none() {
            self.ticker = Some(self.cooldown.spawn_ticker());
        }
    }

    pub fn cells(&self) -> &OtpCells {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut OtpCells {
        &mut self.cells
    }

    pub fn cooldown(&self) -> &ResendCooldown {
        &self.cooldown
    }

    pub fn state(&self) -> VerificationState {
        self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state != VerificationState::Verified && self.cells.is_complete()
    }

    /// 提交验证码
    pub async fn verify(&mut self, scope: &ViewScope) -> PortalResult<VerificationState> {
        if self.state == VerificationState::Verified {
            return Ok(self.state);
        }
        let ctx = self.client.context().clone();

        let Some(code) = self.cells.code() else {
            let e = PortalError::Validation("Please enter the complete 6-digit code".to_string());
            ctx.notify(scope, Notification::error(e.to_string())).await;
            return Err(e);
        };
        let Some(token) = ctx.token().await? else {
            let e = PortalError::MissingToken;
            ctx.notify(scope, Notification::error(e.to_string())).await;
            return Err(e);
        };

        match self.api.verify_otp(&token, code).await {
            Ok(resp) => {
                info!("[OTP] ✅ 验证成功");
                self.state = VerificationState::Verified;
                let message = resp
                    .message
                    .unwrap_or_else(|| "Email verified successfully!".to_string());
                ctx.notify(scope, Notification::success(message)).await;
                Ok(self.state)
            }
            Err(e) => {
                self.state = VerificationState::Failed;
                self.handle_failure(scope, e).await
            }
        }
    }

    /// 重发验证码；冷却中不发请求，冷却值保持不变
    pub async fn resend(&mut self, scope: &ViewScope) -> PortalResult<()> {
        let ctx = self.client.context().clone();
        if self.cooldown.is_active() {
            warn!(
                "[OTP] 冷却中，{} 秒后才能重发",
                self.cooldown.remaining()
            );
            return Err(PortalError::Validation(format!(
                "Please wait {} seconds before requesting a new code",
                self.cooldown.remaining()
            )));
        }
        let Some(token) = ctx.token().await? else {
            let e = PortalError::MissingToken;
            ctx.notify(scope, Notification::error(e.to_string())).await;
            return Err(e);
        };

        match self.api.resend_otp(&token).await {
            Ok(resp) => {
                info!("[OTP] 📨 验证码已重发");
                self.cells.clear();
                self.cooldown.restart();
                let message = resp
                    .message
                    .unwrap_or_else(|| "A new code has been sent to your email".to_string());
                ctx.notify(scope, Notification::success(message)).await;
                Ok(())
            }
            Err(e) => self.handle_failure(scope, e).await,
        }
    }

    /// 401 时删除 token 并整页跳转到登录页，其他错误仅提示
    async fn handle_failure<T>(&self, scope: &ViewScope, e: PortalError) -> PortalResult<T> {
        let ctx = self.client.context();
        if e.is_unauthorized() {
            warn!("[OTP] 🔒 会话已失效，返回登录页: {}", e);
            // 存储失败也要回到登录页
            if let Err(storage_err) = ctx.storage().clear_token().await {
                error!("[OTP] ❌ 删除 token 失败: {}", storage_err);
            }
            ctx.hard_redirect(scope, Route::Login).await;
        } else {
            error!("[OTP] ❌ 请求失败: {}", e);
            ctx.notify(scope, Notification::error(e.user_message(FALLBACK_ERROR_MESSAGE)))
                .await;
        }
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::client::ClientConfig;
    use crate::portal::context::AppContext;
    use crate::portal::storage::{BrowserStorage, KeyValueStore, MemoryStore};
    use crate::portal::testing::{test_client, RecordingListener};
    use std::sync::Arc;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fill(verifier: &mut OtpVerifier, digits: &str) {
        for (i, d) in digits.chars().enumerate() {
            verifier.cells_mut().input(i, &d.to_string());
        }
    }

    #[tokio::test]
    async fn verify_submits_code_as_integer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .and(header("token", "abc"))
            .and(body_json(json!({"otp": 482913})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Verified"})))
            .expect(1)
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        let scope = ViewScope::new("verify-otp");

        fill(&mut verifier, "48291");
        assert!(!verifier.can_submit());
        fill(&mut verifier, "482913");
        assert!(verifier.can_submit());

        let state = verifier.verify(&scope).await.unwrap();
        assert_eq!(state, VerificationState::Verified);
        assert!(!verifier.can_submit());
        // 终态后不再提交
        assert_eq!(verifier.verify(&scope).await.unwrap(), VerificationState::Verified);
        assert_eq!(listener.notifications().await[0].message, "Verified");
    }

    #[tokio::test]
    async fn incomplete_code_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (client, _listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123");

        let result = verifier.verify(&ViewScope::new("verify-otp")).await;
        assert!(matches!(result, Err(PortalError::Validation(_))));
        assert_eq!(verifier.state(), VerificationState::Pending);
    }

    #[tokio::test]
    async fn missing_token_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (client, _listener) = test_client(&server.uri());
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");

        let result = verifier.verify(&ViewScope::new("verify-otp")).await;
        assert!(matches!(result, Err(PortalError::MissingToken)));
    }

    #[tokio::test]
    async fn verify_401_clears_token_and_hard_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        let storage = client.context().storage().clone();
        storage.store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");

        let result = verifier.verify(&ViewScope::new("verify-otp")).await;

        assert!(matches!(result, Err(PortalError::Unauthorized(_))));
        assert_eq!(storage.token().await.unwrap(), None);
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
        assert!(listener.routes().await.is_empty());
    }

    #[tokio::test]
    async fn verify_other_failure_keeps_user_on_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid OTP"})))
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");

        let result = verifier.verify(&ViewScope::new("verify-otp")).await;

        assert!(result.is_err());
        assert_eq!(verifier.state(), VerificationState::Failed);
        assert!(verifier.can_submit());
        assert_eq!(listener.last_error().await.as_deref(), Some("Invalid OTP"));
        assert_eq!(client.context().token().await.unwrap().as_deref(), Some("abc"));
        assert!(listener.hard_redirects().await.is_empty());
    }

    #[tokio::test]
    async fn resend_blocked_during_cooldown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (client, _listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        verifier.cooldown().tick();
        let before = verifier.cooldown().remaining();

        let result = verifier.resend(&ViewScope::new("verify-otp")).await;

        assert!(matches!(result, Err(PortalError::Validation(_))));
        assert_eq!(verifier.cooldown().remaining(), before);
    }

    #[tokio::test]
    async fn resend_401_clears_token_and_hard_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resend-otp"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        let storage = client.context().storage().clone();
        storage.store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");
        while verifier.cooldown().is_active() {
            verifier.cooldown().tick();
        }

        let result = verifier.resend(&ViewScope::new("verify-otp")).await;

        assert!(matches!(result, Err(PortalError::Unauthorized(_))));
        assert_eq!(storage.token().await.unwrap(), None);
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
        // 失败时不清空输入、不重置冷却
        assert!(verifier.cells().is_complete());
        assert_eq!(verifier.cooldown().remaining(), 0);
    }

    /// 删除总是失败的存储
    struct StuckStore(MemoryStore);

    #[async_trait::async_trait]
    impl KeyValueStore for StuckStore {
        async fn get(&self, key: &str) -> PortalResult<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> PortalResult<()> {
            self.0.set(key, value).await
        }

        async fn remove(&self, _key: &str) -> PortalResult<()> {
            Err(PortalError::Storage("locked".to_string()))
        }

        async fn clear(&self) -> PortalResult<()> {
            Err(PortalError::Storage("locked".to_string()))
        }
    }

    #[tokio::test]
    async fn verify_401_redirects_even_when_token_removal_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let listener = Arc::new(RecordingListener::default());
        let storage = BrowserStorage::new(
            Arc::new(StuckStore(MemoryStore::new())),
            Arc::new(MemoryStore::new()),
        );
        storage.store_token("abc").await.unwrap();
        let ctx = AppContext::with_listener(storage, listener.clone());
        let client = PortalClient::new(ClientConfig::new().with_api_base_url(server.uri()), ctx);
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");

        let result = verifier.verify(&ViewScope::new("verify-otp")).await;

        assert!(matches!(result, Err(PortalError::Unauthorized(_))));
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
    }

    #[tokio::test]
    async fn resend_clears_cells_and_restarts_cooldown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resend-otp"))
            .and(header("token", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "OTP sent"})))
            .expect(1)
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut verifier = client.otp_verifier();
        fill(&mut verifier, "123456");
        while verifier.cooldown().is_active() {
            verifier.cooldown().tick();
        }

        verifier.resend(&ViewScope::new("verify-otp")).await.unwrap();

        assert_eq!(verifier.cells(), &OtpCells::new());
        assert_eq!(verifier.cooldown().remaining(), 30);
        assert_eq!(listener.notifications().await[0].message, "OTP sent");
    }
}

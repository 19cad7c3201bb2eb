//! 门户客户端核心实现
//!
//! 持有共享的 HTTP 客户端和应用上下文，各业务模块通过它发起请求。

use crate::portal::auth::CredentialExchange;
use crate::portal::context::AppContext;
use crate::portal::error::{PortalError, PortalResult};
use crate::portal::listener::PortalListener;
use crate::portal::otp::OtpVerifier;
use crate::portal::project::ProjectEditor;
use crate::portal::session::SessionResolver;
use crate::portal::storage::BrowserStorage;
use reqwest::RequestBuilder;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 后端接口路径（相对于 `api_base_url`）
pub mod endpoints {
    pub const CHECK_SESSION: &str = "check-session";
    pub const LOGIN: &str = "login";
    pub const SIGNUP: &str = "signup";
    pub const GOOGLE_AUTH: &str = "auth/google";
    pub const VERIFY_OTP: &str = "verify-otp";
    pub const RESEND_OTP: &str = "resend-otp";
    pub const GET_ALL_CUSTOMERS: &str = "get-all-customers";
    pub const GET_ALL_CONTACTS: &str = "get-all-contacts";
    pub const UPDATE_PROJECT: &str = "update-project";
}

pub const DEFAULT_API_BASE_URL: &str = "https://chikaai.net/api/fusedai";
pub const DEFAULT_STORAGE_DB_URL: &str = "sqlite://fusedai_portal.db?mode=rwc";

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// HTTP API 基础地址
    pub api_base_url: String,
    /// 持久化存储使用的 SQLite 数据库 URL
    ///
    /// 例如：`sqlite://fusedai_portal.db?mode=rwc`
    pub storage_db_url: String,
    /// 携带 token 的请求头名称
    pub token_header: String,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_db_url: DEFAULT_STORAGE_DB_URL.to_string(),
            token_header: "token".to_string(),
        }
    }

    /// 默认配置，环境变量 `FUSEDAI_API_BASE_URL` / `FUSEDAI_STORAGE_DB_URL` 可覆盖
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(url) = std::env::var("FUSEDAI_API_BASE_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(url) = std::env::var("FUSEDAI_STORAGE_DB_URL") {
            if !url.is_empty() {
                config.storage_db_url = url;
            }
        }
        config
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_storage_db_url(mut self, url: impl Into<String>) -> Self {
        self.storage_db_url = url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 门户客户端
#[derive(Clone)]
pub struct PortalClient {
    pub(crate) config: ClientConfig,
    http: reqwest::Client,
    ctx: AppContext,
}

impl PortalClient {
    /// 使用已有上下文创建客户端
    pub fn new(config: ClientConfig, ctx: AppContext) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            ctx,
        }
    }

    /// 打开持久化存储、初始化上下文并创建客户端
    pub async fn connect(
        config: ClientConfig,
        listener: Arc<dyn PortalListener>,
    ) -> PortalResult<Self> {
        info!(
            "[Client] 🔗 初始化门户客户端 (api={}, storage={})",
            config.api_base_url, config.storage_db_url
        );
        let storage = BrowserStorage::open(&config.storage_db_url).await?;
        let ctx = AppContext::with_listener(storage, listener);
        ctx.init().await?;
        Ok(Self::new(config, ctx))
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// 无需认证的 POST 请求
    pub(crate) fn public_post(&self, endpoint: &str) -> RequestBuilder {
        let url = self.url(endpoint);
        debug!("[Client]   请求URL: {}", url);
        self.http
            .post(url)
            .header("Content-Type", "application/json")
            .header("operationID", Uuid::new_v4().to_string())
    }

    /// 携带 token 的请求；本地没有 token 时直接返回 `MissingToken`，不发请求
    pub(crate) async fn authed(
        &self,
        method: reqwest::Method,
        endpoint: &str,
    ) -> PortalResult<RequestBuilder> {
        let token = self.ctx.token().await?.ok_or(PortalError::MissingToken)?;
        Ok(self.authed_with(method, endpoint, &token))
    }

    pub(crate) fn authed_with(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        token: &str,
    ) -> RequestBuilder {
        let url = self.url(endpoint);
        debug!("[Client]   请求URL: {} ({})", url, method);
        self.http
            .request(method, url)
            .header(self.config.token_header.as_str(), token)
            .header("operationID", Uuid::new_v4().to_string())
    }

    pub fn session_resolver(&self) -> SessionResolver {
        SessionResolver::new(self.clone())
    }

    pub fn credentials(&self) -> CredentialExchange {
        CredentialExchange::new(self.clone())
    }

    pub fn otp_verifier(&self) -> OtpVerifier {
        OtpVerifier::new(self.clone())
    }

    pub fn project_editor(&self) -> ProjectEditor {
        ProjectEditor::new(self.clone())
    }
}

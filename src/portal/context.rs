//! 应用上下文
//!
//! token、主题等全局状态通过显式传递的 `AppContext` 管理：启动时初始化，登出时清理。

use crate::portal::error::PortalResult;
use crate::portal::listener::{EmptyPortalListener, Notification, PortalListener};
use crate::portal::routing::Route;
use crate::portal::storage::BrowserStorage;
use crate::portal::theme::Theme;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// 页面活动标记
///
/// 页面卸载后调用 `deactivate`，之后到达的响应不再触发跳转或提示。
#[derive(Clone, Debug)]
pub struct ViewScope {
    name: &'static str,
    active: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        debug!("[View] 页面 {} 已卸载", self.name);
    }
}

#[derive(Clone)]
pub struct AppContext {
    storage: BrowserStorage,
    theme: Arc<RwLock<Theme>>,
    listener: Arc<dyn PortalListener>,
}

impl AppContext {
    pub fn new(storage: BrowserStorage) -> Self {
        Self {
            storage,
            theme: Arc::new(RwLock::new(Theme::default())),
            listener: Arc::new(EmptyPortalListener),
        }
    }

    pub fn with_listener(storage: BrowserStorage, listener: Arc<dyn PortalListener>) -> Self {
        Self {
            listener,
            ..Self::new(storage)
        }
    }

    pub fn set_listener(&mut self, listener: Arc<dyn PortalListener>) {
        self.listener = listener;
    }

    /// 启动时从存储恢复主题
    pub async fn init(&self) -> PortalResult<()> {
        let theme = Theme::load(&self.storage).await?;
        *self.theme.write().await = theme;
        info!("[Context] 🚀 应用上下文初始化完成，主题: {}", theme.as_str());
        Ok(())
    }

    pub fn storage(&self) -> &BrowserStorage {
        &self.storage
    }

    pub async fn theme(&self) -> Theme {
        *self.theme.read().await
    }

    pub async fn toggle_theme(&self) -> PortalResult<Theme> {
        let mut guard = self.theme.write().await;
        let next = guard.toggled();
        next.save(&self.storage).await?;
        *guard = next;
        Ok(next)
    }

    pub async fn token(&self) -> PortalResult<Option<String>> {
        self.storage.token().await
    }

    /// 登出：清除 token、注册标记和项目缓存，主题保留
    pub async fn clear_session(&self) -> PortalResult<()> {
        self.storage.clear_token().await?;
        self.storage.clear_signup_marker().await?;
        self.storage.clear_current_project().await?;
        info!("[Context] 👋 会话状态已清理");
        Ok(())
    }

    pub async fn navigate(&self, scope: &ViewScope, route: Route) {
        if !scope.is_active() {
            debug!("[Context] 页面 {} 已卸载，忽略跳转 {}", scope.name(), route);
            return;
        }
        info!("[Context] 🧭 跳转到 {}", route);
        self.listener.on_navigate(route).await;
    }

    pub async fn hard_redirect(&self, scope: &ViewScope, route: Route) {
        if !scope.is_active() {
            debug!("[Context] 页面 {} 已卸载，忽略整页跳转 {}", scope.name(), route);
            return;
        }
        info!("[Context] 🔁 整页跳转到 {}", route);
        self.listener.on_hard_redirect(route).await;
    }

    pub async fn notify(&self, scope: &ViewScope, notification: Notification) {
        if !scope.is_active() {
            debug!("[Context] 页面 {} 已卸载，忽略提示", scope.name());
            return;
        }
        self.listener.on_notification(notification).await;
    }
}

//! 门户监听器回调接口
//!
//! SDK 不直接操作界面：页面跳转和提示消息都通过监听器交给调用方。

use crate::portal::routing::Route;
use async_trait::async_trait;

/// 提示消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// 一条短暂显示的提示消息（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait PortalListener: Send + Sync {
    /// 客户端内路由切换
    async fn on_navigate(&self, route: Route);

    /// 整页跳转（丢弃所有页面状态），用于 401 后强制回到登录页
    async fn on_hard_redirect(&self, route: Route);

    /// 显示提示消息
    async fn on_notification(&self, notification: Notification);
}

/// 默认空实现（无操作）
pub struct EmptyPortalListener;

#[async_trait]
impl PortalListener for EmptyPortalListener {
    async fn on_navigate(&self, _route: Route) {}

    async fn on_hard_redirect(&self, _route: Route) {}

    async fn on_notification(&self, _notification: Notification) {}
}

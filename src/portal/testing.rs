//! 单测公用工具：记录回调的监听器、日志初始化、指向 mock 服务器的客户端

use crate::portal::client::{ClientConfig, PortalClient};
use crate::portal::context::AppContext;
use crate::portal::listener::{Notification, NotificationKind, PortalListener};
use crate::portal::routing::Route;
use crate::portal::storage::BrowserStorage;
use async_trait::async_trait;
use std::sync::{Arc, Once};
use tokio::sync::Mutex;

static INIT_LOGGER: Once = Once::new();

pub(crate) fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::EnvFilter;

        let filter_layer = EnvFilter::new(
            "info,fusedai_portal_rust=debug,sqlx=info,hyper_util::client=info,reqwest=info",
        );

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_test_writer();

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    });
}

#[derive(Default)]
pub(crate) struct RecordingListener {
    routes: Mutex<Vec<Route>>,
    hard_redirects: Mutex<Vec<Route>>,
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingListener {
    pub(crate) async fn routes(&self) -> Vec<Route> {
        self.routes.lock().await.clone()
    }

    pub(crate) async fn hard_redirects(&self) -> Vec<Route> {
        self.hard_redirects.lock().await.clone()
    }

    pub(crate) async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }

    pub(crate) async fn last_error(&self) -> Option<String> {
        self.notifications
            .lock()
            .await
            .iter()
            .rev()
            .find(|n| n.kind == NotificationKind::Error)
            .map(|n| n.message.clone())
    }
}

#[async_trait]
impl PortalListener for RecordingListener {
    async fn on_navigate(&self, route: Route) {
        self.routes.lock().await.push(route);
    }

    async fn on_hard_redirect(&self, route: Route) {
        self.hard_redirects.lock().await.push(route);
    }

    async fn on_notification(&self, notification: Notification) {
        self.notifications.lock().await.push(notification);
    }
}

/// 指向 mock 服务器、使用内存存储的客户端
pub(crate) fn test_client(base_url: &str) -> (PortalClient, Arc<RecordingListener>) {
    init_test_logger();
    let listener = Arc::new(RecordingListener::default());
    let ctx = AppContext::with_listener(BrowserStorage::in_memory(), listener.clone());
    let config = ClientConfig::new().with_api_base_url(base_url);
    (PortalClient::new(config, ctx), listener)
}

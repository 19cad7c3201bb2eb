//! 浏览器存储门面：按键名提供类型化读写

use crate::portal::error::PortalResult;
use crate::portal::storage::dao::SqliteStore;
use crate::portal::storage::store::{KeyValueStore, MemoryStore};
use std::sync::Arc;
use tracing::{debug, info};

/// 存储键名
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const THEME: &str = "theme";
    pub const CURRENT_PROJECT: &str = "currentProject";
    /// 注册流程标记
    pub const SIGNUP_MARKER: &str = "p1";
}

/// 持久化 + 标签页两个作用域
#[derive(Clone)]
pub struct BrowserStorage {
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl BrowserStorage {
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            session,
        }
    }

    /// 持久化作用域使用 SQLite，标签页作用域使用内存
    pub async fn open(db_url: &str) -> PortalResult<Self> {
        let persistent = SqliteStore::connect(db_url).await?;
        Ok(Self::new(Arc::new(persistent), Arc::new(MemoryStore::new())))
    }

    /// 两个作用域都使用内存（测试、一次性会话）
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    pub fn persistent(&self) -> &Arc<dyn KeyValueStore> {
        &self.persistent
    }

    pub fn session(&self) -> &Arc<dyn KeyValueStore> {
        &self.session
    }

    /// 读取 token：优先持久化作用域，其次标签页作用域
    pub async fn token(&self) -> PortalResult<Option<String>> {
        if let Some(token) = non_empty(self.persistent.get(keys::TOKEN).await?) {
            return Ok(Some(token));
        }
        Ok(non_empty(self.session.get(keys::TOKEN).await?))
    }

    /// 同时写入两个作用域
    pub async fn store_token(&self, token: &str) -> PortalResult<()> {
        self.persistent.set(keys::TOKEN, token).await?;
        self.session.set(keys::TOKEN, token).await?;
        info!("[Storage] 🔑 token 已写入两个作用域");
        Ok(())
    }

    /// 从两个作用域删除 token
    pub async fn clear_token(&self) -> PortalResult<()> {
        self.persistent.remove(keys::TOKEN).await?;
        self.session.remove(keys::TOKEN).await?;
        info!("[Storage] 🗑️ token 已从两个作用域删除");
        Ok(())
    }

    pub async fn theme(&self) -> PortalResult<Option<String>> {
        self.persistent.get(keys::THEME).await
    }

    pub async fn set_theme(&self, value: &str) -> PortalResult<()> {
        self.persistent.set(keys::THEME, value).await
    }

    pub async fn current_project_json(&self) -> PortalResult<Option<String>> {
        self.session.get(keys::CURRENT_PROJECT).await
    }

    pub async fn set_current_project_json(&self, json: &str) -> PortalResult<()> {
        debug!("[Storage] 缓存当前项目");
        self.session.set(keys::CURRENT_PROJECT, json).await
    }

    pub async fn clear_current_project(&self) -> PortalResult<()> {
        self.session.remove(keys::CURRENT_PROJECT).await
    }

    pub async fn mark_signup(&self) -> PortalResult<()> {
        self.session.set(keys::SIGNUP_MARKER, "true").await
    }

    pub async fn signup_marked(&self) -> PortalResult<bool> {
        Ok(self.session.get(keys::SIGNUP_MARKER).await?.as_deref() == Some("true"))
    }

    pub async fn clear_signup_marker(&self) -> PortalResult<()> {
        self.session.remove(keys::SIGNUP_MARKER).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_written_and_cleared_in_both_scopes() {
        let storage = BrowserStorage::in_memory();
        assert_eq!(storage.token().await.unwrap(), None);

        storage.store_token("abc").await.unwrap();
        assert_eq!(
            storage.persistent().get(keys::TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(
            storage.session().get(keys::TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );

        storage.clear_token().await.unwrap();
        assert_eq!(storage.persistent().get(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.session().get(keys::TOKEN).await.unwrap(), None);
        assert_eq!(storage.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn token_falls_back_to_tab_scope() {
        let storage = BrowserStorage::in_memory();
        storage.session().set(keys::TOKEN, "tab-only").await.unwrap();
        assert_eq!(storage.token().await.unwrap().as_deref(), Some("tab-only"));

        // 空字符串视为不存在
        storage.session().set(keys::TOKEN, "").await.unwrap();
        assert_eq!(storage.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sqlite_backed_storage_keeps_token() {
        let storage = BrowserStorage::open("sqlite::memory:").await.unwrap();
        storage.store_token("persisted").await.unwrap();
        storage.mark_signup().await.unwrap();
        assert_eq!(storage.token().await.unwrap().as_deref(), Some("persisted"));
        assert!(storage.signup_marked().await.unwrap());
    }
}

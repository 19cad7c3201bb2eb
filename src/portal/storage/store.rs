//! 键值存储接口及内存实现

use crate::portal::error::PortalResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 存储作用域的统一接口
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> PortalResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> PortalResult<()>;

    async fn remove(&self, key: &str) -> PortalResult<()>;

    async fn clear(&self) -> PortalResult<()>;
}

/// 标签页级存储，进程退出即丢失
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortalResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> PortalResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

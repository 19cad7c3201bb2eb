//! 持久化存储数据访问层（基于 sqlx + SQLite）

use crate::portal::error::PortalResult;
use crate::portal::storage::store::KeyValueStore;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

/// 持久化作用域（对应浏览器 localStorage）
pub struct SqliteStore {
    db: Pool<Sqlite>,
}

impl SqliteStore {
    /// 连接数据库并建表
    ///
    /// 内存数据库每个连接都是独立的库，因此只允许一个连接
    pub async fn connect(db_url: &str) -> PortalResult<Self> {
        let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };
        info!("[Storage/DB] 连接持久化存储: {}", db_url);
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await?;
        let store = Self { db };
        store.init_db().await?;
        Ok(store)
    }

    /// 使用已有连接池
    pub async fn with_pool(db: Pool<Sqlite>) -> PortalResult<Self> {
        let store = Self { db };
        store.init_db().await?;
        Ok(store)
    }

    async fn init_db(&self) -> PortalResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        debug!("[Storage/DB] local_storage 表已就绪");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> PortalResult<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;
        debug!("[Storage/DB] 写入键: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortalResult<()> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.db)
            .await?;
        debug!("[Storage/DB] 删除键: {}", key);
        Ok(())
    }

    async fn clear(&self) -> PortalResult<()> {
        sqlx::query("DELETE FROM local_storage")
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

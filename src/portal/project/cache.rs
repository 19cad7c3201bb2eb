//! 当前项目的单槽缓存（标签页作用域 `currentProject`）

use crate::portal::error::PortalResult;
use crate::portal::project::models::Project;
use crate::portal::storage::BrowserStorage;
use tracing::{debug, warn};

/// 按路由 id 读取缓存的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLoad {
    Loaded(Project),
    /// 缓存为空、损坏，或缓存的是另一个项目
    Missing,
}

#[derive(Clone)]
pub struct ProjectCache {
    storage: BrowserStorage,
}

impl ProjectCache {
    pub fn new(storage: BrowserStorage) -> Self {
        Self { storage }
    }

    /// 读取缓存；JSON 损坏时按无缓存处理
    pub async fn current(&self) -> PortalResult<Option<Project>> {
        let Some(json) = self.storage.current_project_json().await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Project>(&json) {
            Ok(project) => Ok(Some(project)),
            Err(e) => {
                warn!("[ProjectCache] 缓存的项目 JSON 无法解析: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn store(&self, project: &Project) -> PortalResult<()> {
        let json = serde_json::to_string(project)?;
        self.storage.set_current_project_json(&json).await?;
        debug!("[ProjectCache] 已缓存项目 {}", project.id);
        Ok(())
    }

    /// 只接受 id 与路由参数一致的缓存记录
    pub async fn load_for(&self, project_id: &str) -> PortalResult<ProjectLoad> {
        match self.current().await? {
            Some(project) if project.id == project_id => Ok(ProjectLoad::Loaded(project)),
            Some(project) => {
                warn!(
                    "[ProjectCache] 缓存的项目 {} 与路由 {} 不一致",
                    project.id, project_id
                );
                Ok(ProjectLoad::Missing)
            }
            None => Ok(ProjectLoad::Missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_for_rejects_stale_or_absent_cache() {
        let storage = BrowserStorage::in_memory();
        let cache = ProjectCache::new(storage.clone());
        assert_eq!(cache.load_for("p1").await.unwrap(), ProjectLoad::Missing);

        let project = Project {
            id: "p1".into(),
            title: "Lobby".into(),
            ..Project::default()
        };
        cache.store(&project).await.unwrap();
        assert_eq!(
            cache.load_for("p1").await.unwrap(),
            ProjectLoad::Loaded(project)
        );
        assert_eq!(cache.load_for("p2").await.unwrap(), ProjectLoad::Missing);

        storage.set_current_project_json("{not json").await.unwrap();
        assert_eq!(cache.current().await.unwrap(), None);
    }
}

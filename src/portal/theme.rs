//! 明暗主题

use crate::portal::error::PortalResult;
use crate::portal::storage::BrowserStorage;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 无法识别的值按浅色处理
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub async fn load(storage: &BrowserStorage) -> PortalResult<Self> {
        Ok(Self::parse(storage.theme().await?.as_deref()))
    }

    pub async fn save(self, storage: &BrowserStorage) -> PortalResult<()> {
        storage.set_theme(self.as_str()).await?;
        info!("[Theme] 🎨 主题已切换为 {}", self.as_str());
        Ok(())
    }
}

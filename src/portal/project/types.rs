//! 项目 API DTO

use crate::portal::project::models::{Project, ProjectStatus};
use serde::{Deserialize, Serialize};

/// 列表响应：可能是裸数组，也可能包在 `data` 字段里
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "customers", alias = "contacts")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Wrapped { data } => data,
        }
    }
}

/// 保存项目时提交的扁平化结构，联系人邮箱或电话合并为 `contact_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProjectPayload {
    pub project_id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub description: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_info: String,
    pub address: String,
    pub date: String,
}

impl From<&Project> for UpdateProjectPayload {
    fn from(p: &Project) -> Self {
        Self {
            project_id: p.id.clone(),
            title: p.title.clone(),
            status: p.status,
            description: p.description.clone(),
            company_name: p.company_name.clone(),
            contact_name: p.contact.name.clone(),
            contact_info: p.contact.email_or_phone().to_string(),
            address: p.address.clone(),
            date: p.date.clone(),
        }
    }
}

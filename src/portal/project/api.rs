//! 项目相关 HTTP API 客户端

use crate::portal::client::{endpoints, PortalClient};
use crate::portal::error::PortalResult;
use crate::portal::project::models::{ContactRecord, Customer};
use crate::portal::project::types::{ListResponse, UpdateProjectPayload};
use crate::portal::types::{handle_http_response, MessageResponse};
use tracing::info;

pub struct ProjectApi {
    client: PortalClient,
}

impl ProjectApi {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    pub async fn get_all_customers(&self, token: &str) -> PortalResult<Vec<Customer>> {
        info!("[ProjectAPI] 📡 请求客户列表");
        let response = self
            .client
            .authed_with(reqwest::Method::POST, endpoints::GET_ALL_CUSTOMERS, token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let list: ListResponse<Customer> = handle_http_response(response, "客户列表").await?;
        let items = list.into_items();
        info!("[ProjectAPI] ✅ 客户列表，共 {} 个", items.len());
        Ok(items)
    }

    pub async fn get_all_contacts(&self, token: &str) -> PortalResult<Vec<ContactRecord>> {
        info!("[ProjectAPI] 📡 请求联系人列表");
        let response = self
            .client
            .authed_with(reqwest::Method::POST, endpoints::GET_ALL_CONTACTS, token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let list: ListResponse<ContactRecord> =
            handle_http_response(response, "联系人列表").await?;
        let items = list.into_items();
        info!("[ProjectAPI] ✅ 联系人列表，共 {} 个", items.len());
        Ok(items)
    }

    pub async fn update_project(
        &self,
        token: &str,
        payload: &UpdateProjectPayload,
    ) -> PortalResult<MessageResponse> {
        info!("[ProjectAPI] 📡 保存项目 {}", payload.project_id);
        let response = self
            .client
            .authed_with(reqwest::Method::POST, endpoints::UPDATE_PROJECT, token)
            .json(payload)
            .send()
            .await?;
        handle_http_response(response, "保存项目").await
    }
}

//! 项目编辑服务层

use crate::portal::client::PortalClient;
use crate::portal::context::ViewScope;
use crate::portal::error::{PortalError, PortalResult, FALLBACK_ERROR_MESSAGE};
use crate::portal::listener::Notification;
use crate::portal::project::api::ProjectApi;
use crate::portal::project::cache::{ProjectCache, ProjectLoad};
use crate::portal::project::models::{ContactRecord, Customer, Project};
use crate::portal::project::types::UpdateProjectPayload;
use crate::portal::routing::Route;
use std::future::Future;
use tracing::{error, info, warn};

/// 下拉列表数据，各自独立维护加载/错误状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceList<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<T>,
}

impl<T> Default for ReferenceList<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            items: Vec::new(),
        }
    }
}

impl<T> ReferenceList<T> {
    fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn loaded(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

pub struct ProjectEditor {
    client: PortalClient,
    api: ProjectApi,
    cache: ProjectCache,
    customers: ReferenceList<Customer>,
    contacts: ReferenceList<ContactRecord>,
}

impl ProjectEditor {
    pub fn new(client: PortalClient) -> Self {
        Self {
            api: ProjectApi::new(client.clone()),
            cache: ProjectCache::new(client.context().storage().clone()),
            client,
            customers: ReferenceList::default(),
            contacts: ReferenceList::default(),
        }
    }

    pub fn cache(&self) -> &ProjectCache {
        &self.cache
    }

    pub fn customers(&self) -> &ReferenceList<Customer> {
        &self.customers
    }

    pub fn contacts(&self) -> &ReferenceList<ContactRecord> {
        &self.contacts
    }

    /// 列表页“编辑”操作：缓存记录并跳转到编辑页
    pub async fn select_project(&self, scope: &ViewScope, project: &Project) -> PortalResult<Route> {
        self.cache.store(project).await?;
        let route = Route::ProjectEdit(project.id.clone());
        self.client.context().navigate(scope, route.clone()).await;
        Ok(route)
    }

    /// 按路由中的项目 id 读取待编辑记录
    pub async fn load_project(&self, project_id: &str) -> PortalResult<ProjectLoad> {
        let load = self.cache.load_for(project_id).await?;
        if load == ProjectLoad::Missing {
            warn!("[Project] ⚠️ 没有项目 {} 的缓存记录", project_id);
        }
        Ok(load)
    }

    /// 并发加载客户和联系人列表
    pub async fn load_reference_lists(&mut self, scope: &ViewScope) {
        self.customers = ReferenceList::pending();
        self.contacts = ReferenceList::pending();
        let this = &*self;
        let ((customers, customers_expired), (contacts, contacts_expired)) = tokio::join!(
            this.fetch_list("客户列表", |token| async move {
                this.api.get_all_customers(&token).await
            }),
            this.fetch_list("联系人列表", |token| async move {
                this.api.get_all_contacts(&token).await
            }),
        );
        self.customers = customers;
        self.contacts = contacts;
        // 两个列表同时 401 时只清理一次
        if customers_expired || contacts_expired {
            self.expire_session(scope).await;
        }
    }

    /// 返回列表状态，以及会话是否已失效（401）
    async fn fetch_list<T, F, Fut>(&self, label: &str, fetch: F) -> (ReferenceList<T>, bool)
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = PortalResult<Vec<T>>>,
    {
        let token = match self.client.context().token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!("[Project] {}：本地没有 token，不发请求", label);
                return (ReferenceList::failed(PortalError::MissingToken.to_string()), false);
            }
            Err(e) => return (ReferenceList::failed(e.to_string()), false),
        };
        match fetch(token).await {
            Ok(items) => (ReferenceList::loaded(items), false),
            Err(e) => {
                let expired = e.is_unauthorized();
                if expired {
                    warn!("[Project] 🔒 {}加载返回 401: {}", label, e);
                } else {
                    error!("[Project] ❌ {}加载失败: {}", label, e);
                }
                (ReferenceList::failed(e.user_message(FALLBACK_ERROR_MESSAGE)), expired)
            }
        }
    }

    /// 保存项目：提交扁平化数据，成功后重新缓存并跳转到详情页
    pub async fn save(&self, scope: &ViewScope, project: &Project) -> PortalResult<Route> {
        let ctx = self.client.context();
        let Some(token) = ctx.token().await? else {
            let e = PortalError::MissingToken;
            ctx.notify(scope, Notification::error(e.to_string())).await;
            return Err(e);
        };
        if project.id.is_empty() {
            let e = PortalError::Validation("Project id is missing".to_string());
            ctx.notify(scope, Notification::error(e.to_string())).await;
            return Err(e);
        }

        let payload = UpdateProjectPayload::from(project);
        match self.api.update_project(&token, &payload).await {
            Ok(resp) => {
                self.cache.store(project).await?;
                info!("[Project] ✅ 项目 {} 已保存", project.id);
                let message = resp
                    .message
                    .unwrap_or_else(|| "Project updated successfully".to_string());
                ctx.notify(scope, Notification::success(message)).await;
                let route = Route::ProjectDetail(project.id.clone());
                ctx.navigate(scope, route.clone()).await;
                Ok(route)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.expire_session(scope).await;
                } else {
                    error!("[Project] ❌ 保存项目失败: {}", e);
                    ctx.notify(scope, Notification::error(e.user_message(FALLBACK_ERROR_MESSAGE)))
                        .await;
                }
                Err(e)
            }
        }
    }

    async fn expire_session(&self, scope: &ViewScope) {
        let ctx = self.client.context();
        warn!("[Project] 🔒 会话已失效，返回登录页");
        if let Err(e) = ctx.storage().clear_token().await {
            error!("[Project] ❌ 删除 token 失败: {}", e);
        }
        ctx.hard_redirect(scope, Route::Login).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::project::models::{Contact, ProjectStatus};
    use crate::portal::testing::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_project() -> Project {
        Project {
            id: "p42".into(),
            title: "Kitchen remodel".into(),
            status: ProjectStatus::Pending,
            description: "Full remodel".into(),
            company_name: "Acme".into(),
            contact: Contact {
                name: "Jo".into(),
                email: String::new(),
                phone: "555-0100".into(),
            },
            address: "1 Main St".into(),
            date: "2026-10-01".into(),
        }
    }

    #[tokio::test]
    async fn missing_token_sets_local_errors_without_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (client, _listener) = test_client(&server.uri());
        let mut editor = client.project_editor();

        editor.load_reference_lists(&ViewScope::new("project-edit")).await;

        assert_eq!(
            editor.customers().error.as_deref(),
            Some("Authentication token not found")
        );
        assert_eq!(
            editor.contacts().error.as_deref(),
            Some("Authentication token not found")
        );
        assert!(!editor.customers().loading);
    }

    #[tokio::test]
    async fn reference_lists_fail_independently() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get-all-customers"))
            .and(header("token", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"_id": "c1", "name": "Acme", "companyName": "Acme Ltd"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/get-all-contacts"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
            .mount(&server)
            .await;
        let (client, _listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut editor = client.project_editor();

        editor.load_reference_lists(&ViewScope::new("project-edit")).await;

        assert_eq!(editor.customers().items.len(), 1);
        assert_eq!(editor.customers().items[0].company_name, "Acme Ltd");
        assert_eq!(editor.customers().error, None);
        assert!(editor.contacts().items.is_empty());
        assert_eq!(editor.contacts().error.as_deref(), Some("db down"));
    }

    #[tokio::test]
    async fn reference_lists_401_expires_session_once() {
        let server = MockServer::start().await;
        for endpoint in ["/get-all-customers", "/get-all-contacts"] {
            Mock::given(method("POST"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(401))
                .expect(1)
                .mount(&server)
                .await;
        }
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut editor = client.project_editor();

        editor.load_reference_lists(&ViewScope::new("project-edit")).await;

        assert_eq!(client.context().token().await.unwrap(), None);
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
        assert!(editor.customers().error.is_some());
        assert!(editor.contacts().error.is_some());
    }

    #[tokio::test]
    async fn contacts_401_alone_expires_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get-all-customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/get-all-contacts"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let mut editor = client.project_editor();

        editor.load_reference_lists(&ViewScope::new("project-edit")).await;

        assert_eq!(editor.customers().error, None);
        assert_eq!(client.context().token().await.unwrap(), None);
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
    }

    #[tokio::test]
    async fn save_posts_flattened_payload_and_navigates_to_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/update-project"))
            .and(header("token", "abc"))
            .and(body_json(json!({
                "project_id": "p42",
                "title": "Kitchen remodel v2",
                "status": "pending",
                "description": "Full remodel",
                "company_name": "Acme",
                "contact_name": "Jo",
                "contact_info": "555-0100",
                "address": "1 Main St",
                "date": "2026-10-01"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Saved"})))
            .expect(1)
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let editor = client.project_editor();
        let scope = ViewScope::new("project-edit");

        let mut project = sample_project();
        editor.select_project(&scope, &project).await.unwrap();
        project.title = "Kitchen remodel v2".into();

        let route = editor.save(&scope, &project).await.unwrap();

        assert_eq!(route, Route::ProjectDetail("p42".into()));
        assert_eq!(
            listener.routes().await,
            vec![
                Route::ProjectEdit("p42".into()),
                Route::ProjectDetail("p42".into())
            ]
        );
        assert_eq!(
            editor.load_project("p42").await.unwrap(),
            ProjectLoad::Loaded(project)
        );
    }

    #[tokio::test]
    async fn save_401_expires_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/update-project"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let (client, listener) = test_client(&server.uri());
        client.context().storage().store_token("abc").await.unwrap();
        let editor = client.project_editor();

        let result = editor
            .save(&ViewScope::new("project-edit"), &sample_project())
            .await;

        assert!(matches!(result, Err(PortalError::Unauthorized(_))));
        assert_eq!(client.context().token().await.unwrap(), None);
        assert_eq!(listener.hard_redirects().await, vec![Route::Login]);
    }
}

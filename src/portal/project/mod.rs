//! 项目编辑模块
//!
//! 项目记录来自标签页缓存（`currentProject`），客户/联系人列表从服务器获取，保存后跳转到详情页。

pub mod api;
pub mod cache;
pub mod models;
pub mod service;
pub mod types;

pub use api::ProjectApi;
pub use cache::{ProjectCache, ProjectLoad};
pub use models::{Contact, ContactRecord, Customer, Project, ProjectStatus};
pub use service::{ProjectEditor, ReferenceList};
pub use types::{ListResponse, UpdateProjectPayload};

//! 项目及客户/联系人数据结构

use serde::{Deserialize, Serialize};
use std::fmt;

/// 项目状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Pending,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Pending => "pending",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 项目联系人（嵌套在项目中）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// 优先邮箱，没有邮箱时用电话
    pub fn email_or_phone(&self) -> &str {
        if self.email.trim().is_empty() {
            &self.phone
        } else {
            &self.email
        }
    }
}

/// 项目记录，缺失字段使用默认值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub description: String,
    #[serde(alias = "company_name")]
    pub company_name: String,
    pub contact: Contact,
    pub address: String,
    pub date: String,
}

/// 客户（下拉列表数据）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "companyName")]
    pub company_name: String,
    pub email: String,
    pub phone: String,
}

/// 联系人（下拉列表数据）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

//! 路由表
//!
//! 服务器通过页面标识（page identifier）告诉客户端下一步显示哪个页面，
//! 会话检查和凭证交换共用同一张路由表。

use std::fmt;

/// 服务器下发的页面标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageId {
    VerifyOtp,
    PlanSelection,
    ChatPage,
    /// 未知标识，原样保留用于日志
    Unknown(String),
}

impl PageId {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "verify_otp" => PageId::VerifyOtp,
            "plan_selection" => PageId::PlanSelection,
            "chat_page" => PageId::ChatPage,
            other => PageId::Unknown(other.to_string()),
        }
    }

    /// 路由表：已知标识映射到目标页面，未知标识返回 None
    pub fn route(&self) -> Option<Route> {
        match self {
            PageId::VerifyOtp => Some(Route::VerifyOtp),
            PageId::PlanSelection => Some(Route::Plans),
            PageId::ChatPage => Some(Route::Chat),
            PageId::Unknown(_) => None,
        }
    }
}

/// 客户端页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Signup,
    VerifyOtp,
    Plans,
    Chat,
    Quote,
    ProjectDetail(String),
    ProjectEdit(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::VerifyOtp => "/verify-otp".to_string(),
            Route::Plans => "/plans".to_string(),
            Route::Chat => "/chat".to_string(),
            Route::Quote => "/quote".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::ProjectEdit(id) => format!("/projects/{}/edit", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

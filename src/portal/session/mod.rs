//! 会话解析模块
//!
//! 受保护页面加载时，用本地 token 向服务器确认会话并按路由表跳转。

pub mod api;
pub mod resolver;

pub use api::{SessionApi, SessionCheckResponse};
pub use resolver::{SessionOutcome, SessionResolver};

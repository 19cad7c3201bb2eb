pub mod animation;
pub mod auth;
pub mod client;
pub mod context;
pub mod error;
pub mod listener;
pub mod otp;
pub mod project;
pub mod quote;
pub mod routing;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientConfig, PortalClient};
pub use context::{AppContext, ViewScope};
pub use error::{PortalError, PortalResult};
pub use listener::{EmptyPortalListener, Notification, NotificationKind, PortalListener};
pub use routing::{PageId, Route};

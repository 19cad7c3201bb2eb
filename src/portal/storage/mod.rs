//! 本地存储模块
//!
//! 模拟浏览器的两种存储作用域：持久化（localStorage，SQLite）和标签页级（sessionStorage，内存）。

pub mod browser;
pub mod dao;
pub mod store;

pub use browser::{keys, BrowserStorage};
pub use dao::SqliteStore;
pub use store::{KeyValueStore, MemoryStore};

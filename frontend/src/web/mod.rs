//! 浏览器侧适配
//!
//! - `http`: 基于 fetch 的 `HttpClient` 实现
//! - `router`: History API 与路由组件

mod http;
pub mod router;

pub use http::FetchHttpClient;

//! 星际云存档官网 - API 访问层
//!
//! 分层结构：
//! - `request`: HTTP 抽象（`HttpClient` trait 及其实现）
//! - `interceptor`: 请求/响应拦截器
//! - `client`: 带配置与拦截器链的 `ApiClient`
//! - `api`: 按资源分组的只读接口 `SiteApi`
//! - `store`: 公告列表与详情弹窗状态
//! - `route`: 路由定义与懒加载记录
//! - `loader`: 页面数据加载
//!
//! 前端 (`frontend/`) 在此之上提供浏览器 fetch 实现和 Leptos 视图。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod loader;
pub mod request;
pub mod route;
pub mod store;

pub use api::SiteApi;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::{AppRoute, RouteState, Transition};
pub use store::{LoadState, NoticeBoard};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

pub use cloudsave_shared as shared;

/// 使用 reqwest 和环境变量配置创建 API 入口
#[cfg(not(target_arch = "wasm32"))]
pub fn connect_from_env() -> ApiResult<SiteApi<ReqwestHttpClient>> {
    let config = ClientConfig::from_env();
    log::info!("[Api] Using backend {}", config.base_url);
    let client = ApiClient::try_new(config, ReqwestHttpClient::new())?;
    Ok(SiteApi::new(client))
}

//! API 上下文
//!
//! 后端地址等配置在编译期通过环境变量注入（`option_env!`），
//! 未设置时使用核心库的默认值。

use crate::web::FetchHttpClient;
use cloudsave::config::{ENV_API_BASE_URL, ENV_API_TIMEOUT_MS, ENV_API_TOKEN};
use cloudsave::{ApiClient, ClientConfig, SiteApi};
use leptos::prelude::*;

pub type Api = SiteApi<FetchHttpClient>;

/// 编译期环境变量查找
fn build_time_var(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_BASE_URL => option_env!("CLOUDSAVE_API_BASE_URL"),
        ENV_API_TIMEOUT_MS => option_env!("CLOUDSAVE_API_TIMEOUT_MS"),
        ENV_API_TOKEN => option_env!("CLOUDSAVE_API_TOKEN"),
        _ => None,
    };
    value.map(str::to_string)
}

/// 创建 API 入口，配置无效时退回默认配置
pub fn create_api() -> Api {
    let config = ClientConfig::from_vars(build_time_var);
    let client = match ApiClient::try_new(config, FetchHttpClient) {
        Ok(client) => client,
        Err(e) => {
            log::error!("[Api] {}; falling back to {}", e, cloudsave::config::DEFAULT_BASE_URL);
            ApiClient::new(ClientConfig::default(), FetchHttpClient)
        }
    };
    log::info!("[Api] Backend: {}", client.config().base_url);
    SiteApi::new(client)
}

/// 从 Context 获取 API 入口
pub fn use_api() -> Api {
    use_context::<Api>().expect("SiteApi should be provided")
}

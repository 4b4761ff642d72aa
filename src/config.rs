use crate::error::{ApiError, ApiResult};
use cloudsave_shared::{HEADER_ACCEPT, HEADER_AUTHORIZATION};
use std::fmt;
use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

pub const ENV_API_BASE_URL: &str = "CLOUDSAVE_API_BASE_URL";
pub const ENV_API_TIMEOUT_MS: &str = "CLOUDSAVE_API_TIMEOUT_MS";
pub const ENV_API_TOKEN: &str = "CLOUDSAVE_API_TOKEN";

/// 未配置时使用的本地后端地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
/// 浏览器 `setTimeout` 的延迟是 i32，超出会立即触发
pub const MAX_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// HTTP 客户端配置
///
/// 凭据只能来自外部配置，源码中不存放任何 token。
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端地址，不带结尾的 `/`
    pub base_url: String,
    /// 单次请求的超时时间
    pub timeout: Duration,
    /// 每个请求都会携带的请求头
    pub default_headers: Vec<(String, String)>,
    /// 可选的 Bearer token
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![(HEADER_ACCEPT.to_string(), "application/json".to_string())],
            bearer_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.default_headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// 从进程环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取配置，读不到就用默认值
    ///
    /// 前端在编译期用 `option_env!` 提供查找函数。
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            non_empty(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );

        if let Some(raw) = non_empty(ENV_API_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 && u128::from(ms) <= MAX_TIMEOUT.as_millis() => {
                    config.timeout = Duration::from_millis(ms)
                }
                _ => log::warn!(
                    "[Config] Ignoring invalid {}={:?}, using {}ms",
                    ENV_API_TIMEOUT_MS,
                    raw,
                    DEFAULT_TIMEOUT.as_millis()
                ),
            }
        }

        config.bearer_token = non_empty(ENV_API_TOKEN).map(|t| t.trim().to_string());
        config
    }

    /// 校验配置是否可用
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base URL is empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::config(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout must be greater than zero"));
        }
        if self.timeout > MAX_TIMEOUT {
            return Err(ApiError::config(format!(
                "timeout must not exceed {}ms",
                MAX_TIMEOUT.as_millis()
            )));
        }
        Ok(())
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 构造时确定的全局请求头（默认头 + 认证头）
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = self.default_headers.clone();
        if let Some(token) = &self.bearer_token {
            headers.push((HEADER_AUTHORIZATION.to_string(), format!("Bearer {}", token)));
        }
        headers
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// token 不进日志
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_local_defaults() {
        let config = ClientConfig::from_vars(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.bearer_token, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_vars(lookup(&[
            (ENV_API_BASE_URL, "https://api.example.com/"),
            (ENV_API_TIMEOUT_MS, "2500"),
            (ENV_API_TOKEN, " abc "),
        ]));

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.bearer_token.as_deref(), Some("abc"));
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let config = ClientConfig::from_vars(lookup(&[
            (ENV_API_BASE_URL, "   "),
            (ENV_API_TIMEOUT_MS, "soon"),
            (ENV_API_TOKEN, ""),
        ]));

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.bearer_token, None);
    }

    #[test]
    fn url_joins_with_single_slash() {
        let config = ClientConfig::new("http://h:1/");
        assert_eq!(config.url("/api/stats"), "http://h:1/api/stats");
        assert_eq!(config.url("api/stats"), "http://h:1/api/stats");
    }

    #[test]
    fn headers_include_bearer_only_when_configured() {
        let plain = ClientConfig::new("http://h");
        assert!(!plain.headers().iter().any(|(k, _)| k == HEADER_AUTHORIZATION));

        let authed = plain.with_bearer_token("t0k");
        assert!(
            authed
                .headers()
                .contains(&(HEADER_AUTHORIZATION.to_string(), "Bearer t0k".to_string()))
        );
    }

    #[test]
    fn validate_rejects_bad_urls() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("ftp://h").validate().is_err());
        assert!(
            ClientConfig::new("http://h")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn oversized_timeout_is_rejected() {
        let config = ClientConfig::new("http://h");
        assert!(config.clone().with_timeout(MAX_TIMEOUT).validate().is_ok());
        assert!(
            config
                .with_timeout(MAX_TIMEOUT + Duration::from_millis(1))
                .validate()
                .is_err()
        );

        let from_env = ClientConfig::from_vars(|key| match key {
            ENV_API_TIMEOUT_MS => Some("4294967296".to_string()),
            _ => None,
        });
        assert_eq!(from_env.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new("http://h").with_bearer_token("secret-token");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}

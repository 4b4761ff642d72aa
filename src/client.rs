//! HTTP 客户端封装
//!
//! 负责：base URL 拼接、超时、全局请求头（含可选的 Bearer 认证）、
//! 拦截器链，以及把响应体解码为目标类型。

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::interceptor::{
    LogSink, RequestInfo, RequestInterceptor, ResponseInterceptor, UnwrapBody,
};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use cloudsave_shared::protocol::ApiRequest;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// API 客户端
///
/// 通过泛型 `C` 注入具体的 HTTP 实现（浏览器 fetch / reqwest / mock）。
#[derive(Clone)]
pub struct ApiClient<C> {
    config: ClientConfig,
    /// 构造时确定的全局请求头
    headers: Vec<(String, String)>,
    transport: C,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptor: Arc<dyn ResponseInterceptor>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(config: ClientConfig, transport: C) -> Self {
        let headers = config.headers();
        Self {
            config,
            headers,
            transport,
            request_interceptors: Vec::new(),
            response_interceptor: Arc::new(UnwrapBody::new(LogSink)),
        }
    }

    /// 校验配置后再创建
    pub fn try_new(config: ClientConfig, transport: C) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self::new(config, transport))
    }

    /// 追加一个请求拦截器（按添加顺序执行）
    pub fn with_request_interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: RequestInterceptor + 'static,
    {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    /// 替换响应拦截器
    pub fn with_response_interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: ResponseInterceptor + 'static,
    {
        self.response_interceptor = Arc::new(interceptor);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    fn build(&self, method: HttpMethod, path: &str, query: &[(&str, String)]) -> HttpRequest {
        let mut req = HttpRequest::new(&self.config.url(path), method)
            .with_timeout(self.config.timeout);

        for (k, v) in &self.headers {
            req = req.with_header(k, v);
        }
        for (k, v) in query {
            req = req.with_query(k, v);
        }
        req
    }

    /// GET 请求，返回解码后的响应体
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let req = self.build(HttpMethod::Get, path, query);
        self.execute(req).await
    }

    /// POST 请求，body 以 JSON 发送
    pub async fn post<T, B>(&self, path: &str, query: &[(&str, String)], body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.build(HttpMethod::Post, path, query);
        match serde_json::to_value(body) {
            Ok(value) => self.execute(req.with_body(value)).await,
            Err(e) => {
                let info = RequestInfo::from(&req);
                let err = ApiError::from(e).in_op_with("client.encode_body", path);
                Err(self.response_interceptor.on_rejected(&info, err))
            }
        }
    }

    /// 发送强类型请求
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let path = request.path();
        let query = request.query();
        let req = self.build(R::METHOD, &path, &query);
        self.execute(req).await
    }

    async fn execute<T: DeserializeOwned>(&self, req: HttpRequest) -> ApiResult<T> {
        // 1. 请求拦截器
        let req = self
            .request_interceptors
            .iter()
            .fold(req, |req, interceptor| interceptor.intercept(req));

        let info = RequestInfo::from(&req);
        log::debug!("[Api] {} {} ({})", info.method.as_str(), info.url, info.id);

        // 2. 发送，非 2xx 视为失败
        let outcome = match self.transport.send(req).await {
            Ok(resp) if resp.is_success() => self
                .response_interceptor
                .on_fulfilled(resp)
                .and_then(|body| decode::<T>(&body)),
            Ok(resp) => Err(ApiError::status(resp.status, status_message(resp.status, &resp.body))),
            Err(e) => Err(e),
        };

        // 3. 失败统一交给响应拦截器（记录一次，原样返回）
        outcome.map_err(|e| self.response_interceptor.on_rejected(&info, e))
    }
}

/// 空响应体按 `null` 解码（如 204）
fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ApiError::from)
}

fn status_message(status: u16, body: &str) -> String {
    const MAX_BODY: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return format!("request failed with status {}", status);
    }
    let snippet: String = body.chars().take(MAX_BODY).collect();
    format!("request failed with status {}: {}", status, snippet)
}

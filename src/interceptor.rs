//! 拦截器模块
//!
//! 每个请求发出前依次经过请求拦截器；响应回来后交给响应拦截器：
//! 成功时只取出响应体，失败时记录一条诊断日志并原样返回错误。

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpMethod, HttpRequest, HttpResponse};
use cloudsave_shared::HEADER_REQUEST_ID;
use uuid::Uuid;

// =========================================================
// 请求拦截器
// =========================================================

/// 请求拦截器，对每个发出的请求做统一变换
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, req: HttpRequest) -> HttpRequest;
}

/// 把请求的关联 ID 写入 `X-Request-Id`
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationHeader;

impl RequestInterceptor for CorrelationHeader {
    fn intercept(&self, req: HttpRequest) -> HttpRequest {
        let id = req.id.to_string();
        req.with_header(HEADER_REQUEST_ID, &id)
    }
}

// =========================================================
// 响应拦截器
// =========================================================

/// 失败日志需要的请求摘要（请求本身在发送时已被消费）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub id: Uuid,
    pub method: HttpMethod,
    pub url: String,
}

impl From<&HttpRequest> for RequestInfo {
    fn from(req: &HttpRequest) -> Self {
        Self {
            id: req.id,
            method: req.method,
            url: req.url.clone(),
        }
    }
}

/// 响应拦截器
pub trait ResponseInterceptor: Send + Sync {
    /// 2xx 响应：返回调用方真正关心的部分
    fn on_fulfilled(&self, resp: HttpResponse) -> ApiResult<String>;

    /// 任何失败都会且只会经过这里一次
    fn on_rejected(&self, info: &RequestInfo, err: ApiError) -> ApiError;
}

/// 诊断输出
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, info: &RequestInfo, err: &ApiError);
}

/// 通过 `log` 门面输出
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, info: &RequestInfo, err: &ApiError) {
        log::error!(
            "[Api] {} {} failed (request {}): {}",
            info.method.as_str(),
            info.url,
            info.id,
            err
        );
    }
}

/// 默认响应拦截器：成功只留响应体，失败记录后原样抛出
///
/// 不重试、不重新分类、不退避。
#[derive(Debug, Clone, Default)]
pub struct UnwrapBody<S = LogSink> {
    sink: S,
}

impl<S: DiagnosticSink> UnwrapBody<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: DiagnosticSink> ResponseInterceptor for UnwrapBody<S> {
    fn on_fulfilled(&self, resp: HttpResponse) -> ApiResult<String> {
        Ok(resp.body)
    }

    fn on_rejected(&self, info: &RequestInfo, err: ApiError) -> ApiError {
        self.sink.record(info, &err);
        err
    }
}

// =========================================================
// 测试工具: RecordingSink
// =========================================================

#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingSink {
    entries: std::sync::Arc<std::sync::Mutex<Vec<(RequestInfo, ApiError)>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn entries(&self) -> Vec<(RequestInfo, ApiError)> {
        self.entries.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn record(&self, info: &RequestInfo, err: &ApiError) {
        self.entries
            .lock()
            .unwrap()
            .push((info.clone(), err.clone()));
    }
}

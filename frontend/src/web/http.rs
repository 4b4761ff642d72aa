//! 浏览器 fetch 传输层
//!
//! 基于 `gloo-net` 实现核心库的 `HttpClient`，
//! 超时通过与 `gloo-timers` 定时器竞速实现。

use cloudsave::{ApiError, ApiResult, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use futures::future::{Either, select};
use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

/// `setTimeout` 的延迟是 i32，超出部分截断
fn timeout_millis(timeout: Duration) -> u32 {
    let max = i32::MAX as u32;
    u32::try_from(timeout.as_millis()).map_or(max, |ms| ms.min(max))
}

/// fetch 客户端（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = RequestBuilder::new(&req.url).method(method);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("请求构建失败: {}", e)))?;

        let fetch = Box::pin(request.send());
        let sent = match req.timeout {
            Some(timeout) => {
                let millis = timeout_millis(timeout);
                match select(fetch, TimeoutFuture::new(millis)).await {
                    Either::Left((result, _)) => result,
                    // 丢弃 fetch future，迟到的响应不再处理
                    Either::Right(_) => {
                        return Err(ApiError::timeout(format!(
                            "请求超时 ({}ms): {}",
                            millis, req.url
                        )));
                    }
                }
            }
            None => fetch.await,
        };

        let response = sent.map_err(|e| ApiError::transport(format!("网络错误: {}", e)))?;

        let status = response.status();
        let headers = response.headers().entries().collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

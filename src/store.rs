//! 应用状态
//!
//! `NoticeBoard` 是与 UI 框架无关的状态本体：演示计数器、公告列表、
//! 公告详情弹窗。前端把它放进一个信号里作为上下文提供给各页面。
//!
//! 公告列表在 store 创建时抓取且只抓取一次，没有刷新路径。

use crate::api::SiteApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use cloudsave_shared::{DataList, Envelope, Notice};

/// 公告列表的加载状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ApiError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoticeBoard {
    count: i64,
    notices: Vec<Notice>,
    current: Option<Notice>,
    show_detail: bool,
    load: LoadState,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // --- 计数器 ---

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn double_count(&self) -> i64 {
        self.count * 2
    }

    // --- 公告列表 ---

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// 标记开始加载
    ///
    /// 返回 false 表示已经加载过（或正在加载），调用方不应再发请求。
    pub fn begin_load(&mut self) -> bool {
        if self.load != LoadState::Idle {
            return false;
        }
        self.load = LoadState::Loading;
        true
    }

    /// 写入抓取结果：成功时每项只保留 `attributes`，失败时列表保持原样
    pub fn finish_load(&mut self, result: ApiResult<DataList<Envelope<Notice>>>) {
        match result {
            Ok(list) => {
                self.notices = list
                    .data
                    .into_iter()
                    .map(Envelope::into_attributes)
                    .collect();
                self.load = LoadState::Loaded;
            }
            // 拦截器已记录过该错误，这里只保存状态
            Err(e) => self.load = LoadState::Failed(e.in_op("store.get_data")),
        }
    }

    /// 抓取 `/api/notices` 并写入状态，整个生命周期只生效一次
    pub async fn get_data<C: HttpClient>(&mut self, api: &SiteApi<C>) {
        if !self.begin_load() {
            return;
        }
        let result = api.notices().list().await;
        self.finish_load(result);
    }

    // --- 详情弹窗 ---

    /// 设置当前公告并切换弹窗显示状态
    pub fn toggle_component(&mut self, notice: Notice) {
        self.current = Some(notice);
        self.show_detail = !self.show_detail;
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn is_detail_visible(&self) -> bool {
        self.show_detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::config::ClientConfig;
    use crate::error::ApiErrorKind;
    use crate::interceptor::{RecordingSink, UnwrapBody};
    use crate::request::MockHttpClient;
    use serde_json::{Value, json};
    use std::rc::Rc;

    const NOTICES_URL: &str = "http://h/api/notices";

    fn setup() -> (Rc<MockHttpClient>, SiteApi<Rc<MockHttpClient>>) {
        let mock = Rc::new(MockHttpClient::new());
        let api = SiteApi::new(ApiClient::new(ClientConfig::new("http://h"), mock.clone()));
        (mock, api)
    }

    fn notice(v: Value) -> Notice {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn get_data_unwraps_attributes() {
        let (mock, api) = setup();
        mock.mock_response(
            NOTICES_URL,
            200,
            json!({ "data": [{ "id": 1, "attributes": { "title": "A" } }] }),
        );

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        let as_json = serde_json::to_value(board.notices()).unwrap();
        assert_eq!(as_json, json!([{ "title": "A" }]));
        assert_eq!(board.load_state(), &LoadState::Loaded);
    }

    #[tokio::test]
    async fn list_length_matches_response() {
        let (mock, api) = setup();
        let items: Vec<Value> = (0..7)
            .map(|i| json!({ "id": i, "attributes": { "title": format!("N{}", i), "order": i } }))
            .collect();
        mock.mock_response(NOTICES_URL, 200, json!({ "data": items.clone() }));

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        assert_eq!(board.notices().len(), items.len());
        for (notice, item) in board.notices().iter().zip(&items) {
            assert_eq!(&serde_json::to_value(notice).unwrap(), &item["attributes"]);
        }
    }

    #[tokio::test]
    async fn fetch_happens_only_once() {
        let (mock, api) = setup();
        mock.mock_response(NOTICES_URL, 200, json!({ "data": [] }));

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;
        board.get_data(&api).await;

        assert_eq!(mock.hits(NOTICES_URL), 1);
    }

    #[tokio::test]
    async fn failure_keeps_list_empty_and_is_visible() {
        let (mock, api) = setup();
        mock.mock_response(NOTICES_URL, 502, json!({}));

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        assert!(board.notices().is_empty());
        let err = board.load_state().error().unwrap();
        assert_eq!(err.kind(), ApiErrorKind::Status);
        assert_eq!(err.status, Some(502));
    }

    #[tokio::test]
    async fn failed_fetch_is_logged_once() {
        let mock = Rc::new(MockHttpClient::new());
        let sink = RecordingSink::default();
        let client = ApiClient::new(ClientConfig::new("http://h"), mock.clone())
            .with_response_interceptor(UnwrapBody::new(sink.clone()));
        let api = SiteApi::new(client);
        mock.mock_response(NOTICES_URL, 500, json!({ "error": "boom" }));

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.status, Some(500));
        assert_eq!(
            board.load_state().error().map(ApiError::kind),
            Some(ApiErrorKind::Status)
        );
    }

    #[tokio::test]
    async fn loose_ids_do_not_drop_the_list() {
        let (mock, api) = setup();
        mock.mock_response(
            NOTICES_URL,
            200,
            json!({ "data": [
                { "id": "abc", "attributes": { "title": "A" } },
                { "id": -1, "attributes": { "title": "B" } }
            ] }),
        );

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        assert_eq!(board.load_state(), &LoadState::Loaded);
        let as_json = serde_json::to_value(board.notices()).unwrap();
        assert_eq!(as_json, json!([{ "title": "A" }, { "title": "B" }]));
    }

    #[tokio::test]
    async fn unexpected_shape_is_a_decode_failure() {
        let (mock, api) = setup();
        mock.mock_response(NOTICES_URL, 200, json!({ "data": [{ "id": 1, "title": "A" }] }));

        let mut board = NoticeBoard::new();
        board.get_data(&api).await;

        assert!(board.notices().is_empty());
        assert_eq!(
            board.load_state().error().map(ApiError::kind),
            Some(ApiErrorKind::Decode)
        );
    }

    #[test]
    fn begin_load_is_single_shot() {
        let mut board = NoticeBoard::new();
        assert!(board.begin_load());
        assert!(board.load_state().is_loading());
        assert!(!board.begin_load());

        board.finish_load(Err(ApiError::timeout("slow")));
        assert!(!board.begin_load());
    }

    #[test]
    fn toggle_once_sets_current_and_flips() {
        let mut board = NoticeBoard::new();
        let x = notice(json!({ "title": "X" }));

        board.toggle_component(x.clone());

        assert_eq!(board.current_notice(), Some(&x));
        assert!(board.is_detail_visible());
    }

    #[test]
    fn toggle_even_times_restores_flag() {
        let mut board = NoticeBoard::new();
        let a = notice(json!({ "title": "A" }));
        let b = notice(json!({ "title": "B" }));

        for i in 0..6 {
            board.toggle_component(if i % 2 == 0 { a.clone() } else { b.clone() });
        }

        assert!(!board.is_detail_visible());
        assert_eq!(board.current_notice(), Some(&b));
    }

    #[test]
    fn counter() {
        let mut board = NoticeBoard::new();
        board.increment();
        board.increment();
        assert_eq!(board.count(), 2);
        assert_eq!(board.double_count(), 4);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod date;
pub mod protocol;

pub use date::PublishedAt;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const PATH_CLIENT_VERSIONS: &str = "/api/client-versions";
pub const PATH_LATEST_CLIENT_VERSION: &str = "/api/client-versions/latest";
pub const PATH_ANNOUNCEMENTS: &str = "/api/announcements";
pub const PATH_STATS: &str = "/api/stats";
pub const PATH_ACTIVITIES: &str = "/api/activities";
pub const PATH_SCREENSHOTS: &str = "/api/screenshots";
pub const PATH_SITE_CONFIG: &str = "/api/site-config";
pub const PATH_NOTICES: &str = "/api/notices";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

// =========================================================
// 通用包装 (Envelopes)
// =========================================================

/// 单条资源响应 `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<T> {
    pub data: T,
}

/// 列表响应 `{ "data": [...], "meta": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// 带 `attributes` 外壳的列表项 `{ "id": 1, "attributes": {...} }`
///
/// `id` 原样保留，后台可能给出数字、字符串或不给。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    pub attributes: T,
}

impl<T> Envelope<T> {
    /// 拆掉外壳，只保留 `attributes`
    pub fn into_attributes(self) -> T {
        self.attributes
    }
}

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 客户端版本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientVersion {
    #[serde(default)]
    pub id: Option<u64>,
    pub version: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// 服务端返回的其他字段，原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientVersion {
    pub fn published(&self) -> Option<PublishedAt> {
        self.published_at.as_deref().and_then(PublishedAt::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub data: Vec<ClientVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// 公告正文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// 公告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u64,
    #[serde(default)]
    pub is_pinned: bool,
    pub content: AnnouncementContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Announcement {
    pub fn published(&self) -> Option<PublishedAt> {
        self.published_at.as_deref().and_then(PublishedAt::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementList {
    #[serde(default)]
    pub data: Vec<Announcement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// 旧版公告 (`/api/notices`)
///
/// 即列表项 `attributes` 对象本身，字段不做任何裁剪。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notice(Map<String, Value>);

impl Notice {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.get("content").and_then(Value::as_str)
    }

    pub fn published(&self) -> Option<PublishedAt> {
        self.get("publishedAt")
            .or_else(|| self.get("published_at"))
            .and_then(Value::as_str)
            .and_then(PublishedAt::parse)
    }
}

impl From<Map<String, Value>> for Notice {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// 以下资源前端只做透传，不约束结构
pub type Stats = Value;
pub type Activities = Value;
pub type Screenshots = Value;
pub type SiteConfig = Value;

// =========================================================
// 查询参数 (Query Parameters)
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub active_only: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub pinned_first: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notice_envelope_keeps_only_attributes() {
        let raw = json!({
            "data": [
                { "id": 1, "attributes": { "title": "A", "content": "hello" } },
                { "id": 2, "attributes": { "title": "B" } }
            ],
            "meta": { "pagination": { "total": 2 } }
        });

        let list: DataList<Envelope<Notice>> = serde_json::from_value(raw).unwrap();
        let notices: Vec<Notice> = list.data.into_iter().map(Envelope::into_attributes).collect();

        assert_eq!(notices.len(), 2);
        assert_eq!(
            serde_json::to_value(&notices[0]).unwrap(),
            json!({ "title": "A", "content": "hello" })
        );
        assert_eq!(notices[1].title(), Some("B"));
        assert_eq!(notices[1].content(), None);
    }

    #[test]
    fn notice_envelope_accepts_any_id() {
        let raw = json!({
            "data": [
                { "id": "abc", "attributes": { "title": "A" } },
                { "id": -1, "attributes": { "title": "B" } },
                { "attributes": { "title": "C" } }
            ]
        });

        let list: DataList<Envelope<Notice>> = serde_json::from_value(raw).unwrap();
        assert_eq!(list.data.len(), 3);
        assert_eq!(list.data[0].id, json!("abc"));
        assert_eq!(list.data[2].id, Value::Null);
        assert_eq!(list.data[1].attributes.title(), Some("B"));
    }

    #[test]
    fn data_list_defaults_to_empty() {
        let list: DataList<Envelope<Notice>> = serde_json::from_value(json!({})).unwrap();
        assert!(list.data.is_empty());
    }

    #[test]
    fn notice_without_attributes_is_rejected() {
        let raw = json!({ "data": [{ "id": 1, "title": "A" }] });
        assert!(serde_json::from_value::<DataList<Envelope<Notice>>>(raw).is_err());
    }

    #[test]
    fn client_version_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "version": "2.3.1",
            "is_active": true,
            "download_url": "https://example.com/cloudsave-2.3.1.zip",
            "file_size": 1024
        });

        let v: ClientVersion = serde_json::from_value(raw).unwrap();
        assert_eq!(v.version, "2.3.1");
        assert!(v.is_active);
        assert_eq!(v.extra.get("file_size"), Some(&json!(1024)));
        assert!(v.published().is_none());
    }

    #[test]
    fn version_list_without_pagination() {
        let v: VersionList = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(v.data.is_empty());
        assert_eq!(v.pagination, None);
    }

    #[test]
    fn announcement_defaults() {
        let a: Announcement = serde_json::from_value(json!({
            "id": 3,
            "content": { "title": "维护公告" }
        }))
        .unwrap();

        assert!(!a.is_pinned);
        assert_eq!(a.content.title, "维护公告");
        assert_eq!(a.content.body, "");
    }
}

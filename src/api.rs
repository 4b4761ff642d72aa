//! API 接口层
//!
//! 按资源分组的只读接口。每个方法就是一次请求：
//! 不做参数校验、不缓存、不重试、不自动翻页。

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use cloudsave_shared::protocol::{
    AnnouncementDetail, GetSiteConfig, GetStats, LatestClientVersion, ListActivities,
    ListAnnouncements, ListClientVersions, ListNotices, ListScreenshots,
};
use cloudsave_shared::{
    Activities, Announcement, AnnouncementList, AnnouncementQuery, ClientVersion, DataList,
    Envelope, Item, Notice, Screenshots, SiteConfig, Stats, VersionList, VersionQuery,
};

/// 站点 API 入口
#[derive(Clone)]
pub struct SiteApi<C> {
    client: ApiClient<C>,
}

impl<C: HttpClient> SiteApi<C> {
    pub fn new(client: ApiClient<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<C> {
        &self.client
    }

    pub fn client_versions(&self) -> ClientVersionApi<'_, C> {
        ClientVersionApi {
            client: &self.client,
        }
    }

    pub fn announcements(&self) -> AnnouncementApi<'_, C> {
        AnnouncementApi {
            client: &self.client,
        }
    }

    pub fn stats(&self) -> StatsApi<'_, C> {
        StatsApi {
            client: &self.client,
        }
    }

    pub fn activities(&self) -> ActivityApi<'_, C> {
        ActivityApi {
            client: &self.client,
        }
    }

    pub fn screenshots(&self) -> ScreenshotApi<'_, C> {
        ScreenshotApi {
            client: &self.client,
        }
    }

    pub fn site_config(&self) -> SiteConfigApi<'_, C> {
        SiteConfigApi {
            client: &self.client,
        }
    }

    /// 旧版公告接口，仅供 store 使用
    pub fn notices(&self) -> NoticeApi<'_, C> {
        NoticeApi {
            client: &self.client,
        }
    }
}

// =========================================================
// 客户端版本
// =========================================================

pub struct ClientVersionApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> ClientVersionApi<'_, C> {
    /// 获取版本列表
    pub async fn list(&self, query: VersionQuery) -> ApiResult<VersionList> {
        self.client.send(&ListClientVersions(query)).await
    }

    /// 获取最新版本
    pub async fn latest(&self) -> ApiResult<Item<ClientVersion>> {
        self.client.send(&LatestClientVersion).await
    }
}

// =========================================================
// 公告
// =========================================================

pub struct AnnouncementApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> AnnouncementApi<'_, C> {
    /// 获取公告列表
    pub async fn list(&self, query: AnnouncementQuery) -> ApiResult<AnnouncementList> {
        self.client.send(&ListAnnouncements(query)).await
    }

    /// 获取公告详情
    pub async fn detail(&self, id: &str) -> ApiResult<Item<Announcement>> {
        self.client
            .send(&AnnouncementDetail { id: id.to_string() })
            .await
    }
}

// =========================================================
// 透传资源
// =========================================================

pub struct StatsApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> StatsApi<'_, C> {
    /// 公开统计数据
    pub async fn get(&self) -> ApiResult<Stats> {
        self.client.send(&GetStats).await
    }
}

pub struct ActivityApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> ActivityApi<'_, C> {
    pub async fn list(&self) -> ApiResult<Activities> {
        self.client.send(&ListActivities).await
    }
}

pub struct ScreenshotApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> ScreenshotApi<'_, C> {
    pub async fn list(&self) -> ApiResult<Screenshots> {
        self.client.send(&ListScreenshots).await
    }
}

pub struct SiteConfigApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> SiteConfigApi<'_, C> {
    /// 获取所有配置
    pub async fn get_all(&self) -> ApiResult<SiteConfig> {
        self.client.send(&GetSiteConfig).await
    }
}

pub struct NoticeApi<'a, C> {
    client: &'a ApiClient<C>,
}

impl<C: HttpClient> NoticeApi<'_, C> {
    pub async fn list(&self) -> ApiResult<DataList<Envelope<Notice>>> {
        self.client.send(&ListNotices).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test";

    fn setup() -> (Rc<MockHttpClient>, SiteApi<Rc<MockHttpClient>>) {
        let mock = Rc::new(MockHttpClient::new());
        let api = SiteApi::new(ApiClient::new(ClientConfig::new(BASE), mock.clone()));
        (mock, api)
    }

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn every_accessor_is_a_single_get() {
        let (mock, api) = setup();

        let _ = api.client_versions().list(VersionQuery::default()).await;
        let _ = api.client_versions().latest().await;
        let _ = api.announcements().list(AnnouncementQuery::default()).await;
        let _ = api.announcements().detail("12").await;
        let _ = api.stats().get().await;
        let _ = api.activities().list().await;
        let _ = api.screenshots().list().await;
        let _ = api.site_config().get_all().await;
        let _ = api.notices().list().await;

        let requests = mock.requests.borrow();
        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/client-versions",
                "http://api.test/api/client-versions/latest",
                "http://api.test/api/announcements",
                "http://api.test/api/announcements/12",
                "http://api.test/api/stats",
                "http://api.test/api/activities",
                "http://api.test/api/screenshots",
                "http://api.test/api/site-config",
                "http://api.test/api/notices",
            ]
        );
        assert!(requests.iter().all(|r| r.method == HttpMethod::Get));
        assert!(requests.iter().all(|r| r.body.is_none()));
        // 只有 activities 自带 populate
        assert_eq!(requests[5].query, q(&[("populate", "*")]));
        assert!(
            requests
                .iter()
                .enumerate()
                .all(|(i, r)| i == 5 || r.query.is_empty())
        );
    }

    #[tokio::test]
    async fn list_filters_become_query_parameters() {
        let (mock, api) = setup();

        let _ = api
            .client_versions()
            .list(VersionQuery {
                page: Some(1),
                limit: Some(20),
                active_only: Some(true),
            })
            .await;
        let _ = api
            .announcements()
            .list(AnnouncementQuery {
                page: None,
                limit: Some(5),
                pinned_first: Some(true),
            })
            .await;

        let requests = mock.requests.borrow();
        assert_eq!(
            requests[0].query,
            q(&[("page", "1"), ("limit", "20"), ("active_only", "true")])
        );
        assert_eq!(requests[1].query, q(&[("limit", "5"), ("pinned_first", "true")]));
    }

    #[tokio::test]
    async fn typed_payloads_are_decoded() {
        let (mock, api) = setup();
        mock.mock_response(
            "http://api.test/api/client-versions/latest",
            200,
            json!({ "data": { "id": 3, "version": "1.4.0", "is_active": true } }),
        );
        mock.mock_response(
            "http://api.test/api/announcements/9",
            200,
            json!({
                "data": { "id": 9, "is_pinned": true, "content": { "title": "T", "body": "B" } }
            }),
        );
        mock.mock_response(
            "http://api.test/api/stats",
            200,
            json!({ "users": 1200, "saves": 53000 }),
        );

        let latest = api.client_versions().latest().await.unwrap();
        assert_eq!(latest.data.version, "1.4.0");

        let detail = api.announcements().detail("9").await.unwrap();
        assert!(detail.data.is_pinned);
        assert_eq!(detail.data.content.body, "B");

        let stats = api.stats().get().await.unwrap();
        assert_eq!(stats, json!({ "users": 1200, "saves": 53000 }));
    }

    #[tokio::test]
    async fn failures_propagate_unchanged() {
        let (mock, api) = setup();
        mock.mock_response("http://api.test/api/site-config", 401, json!({ "error": "nope" }));

        let err = api.site_config().get_all().await.unwrap_err();
        assert_eq!(err.status, Some(401));
        assert_eq!(mock.hits("http://api.test/api/site-config"), 1);
    }
}

//! 页面数据加载
//!
//! 页面组件通过这里拿数据。同一页面需要的多个资源并发请求，
//! 任一失败则整页失败（错误已在拦截器里记录过）。

use crate::api::SiteApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use cloudsave_shared::{
    Activities, Announcement, AnnouncementList, AnnouncementQuery, ClientVersion, Screenshots,
    SiteConfig, Stats,
};

/// 首页公告条数
pub const HOME_ANNOUNCEMENT_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub latest_version: ClientVersion,
    /// 置顶优先的前几条公告
    pub announcements: Vec<Announcement>,
    pub stats: Stats,
    pub site_config: SiteConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoData {
    pub activities: Activities,
    pub screenshots: Screenshots,
}

/// 首页：最新版本、公告摘要、统计、站点配置
pub async fn load_home<C: HttpClient>(api: &SiteApi<C>) -> ApiResult<HomeData> {
    let query = AnnouncementQuery {
        page: Some(1),
        limit: Some(HOME_ANNOUNCEMENT_LIMIT),
        pinned_first: Some(true),
    };

    let versions = api.client_versions();
    let announcements = api.announcements();
    let stats = api.stats();
    let site_config = api.site_config();

    let (latest, announcements, stats, site_config) = futures::try_join!(
        versions.latest(),
        announcements.list(query),
        stats.get(),
        site_config.get_all()
    )
    .map_err(|e| e.in_op("loader.home"))?;

    Ok(HomeData {
        latest_version: latest.data,
        announcements: announcements.data,
        stats,
        site_config,
    })
}

/// 视频页：活动与截图
pub async fn load_video<C: HttpClient>(api: &SiteApi<C>) -> ApiResult<VideoData> {
    let activities = api.activities();
    let screenshots = api.screenshots();

    let (activities, screenshots) = futures::try_join!(activities.list(), screenshots.list())
        .map_err(|e| e.in_op("loader.video"))?;

    Ok(VideoData {
        activities,
        screenshots,
    })
}

/// 公告页：按查询条件取一页公告
pub async fn load_announcements<C: HttpClient>(
    api: &SiteApi<C>,
    query: AnnouncementQuery,
) -> ApiResult<AnnouncementList> {
    api.announcements()
        .list(query)
        .await
        .map_err(|e| e.in_op("loader.announcements"))
}

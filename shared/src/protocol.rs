use crate::{
    Activities, Announcement, AnnouncementList, AnnouncementQuery, ClientVersion, DataList,
    Envelope, Item, Notice, Screenshots, SiteConfig, Stats, VersionList, VersionQuery,
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that binds an endpoint to its response type and request metadata.
pub trait ApiRequest {
    /// The response body type, after the transport envelope has been stripped.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the API base URL.
    fn path(&self) -> Cow<'static, str>;

    /// Query parameters. Unset optional filters are omitted.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn push_opt<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, v: Option<T>) {
    if let Some(v) = v {
        pairs.push((key, v.to_string()));
    }
}

// =========================================================
// Client versions
// =========================================================

/// List published client builds
#[derive(Debug, Clone, Copy, Default)]
pub struct ListClientVersions(pub VersionQuery);

impl ApiRequest for ListClientVersions {
    type Response = VersionList;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_CLIENT_VERSIONS)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "page", self.0.page);
        push_opt(&mut pairs, "limit", self.0.limit);
        push_opt(&mut pairs, "active_only", self.0.active_only);
        pairs
    }
}

/// Latest client build
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestClientVersion;

impl ApiRequest for LatestClientVersion {
    type Response = Item<ClientVersion>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_LATEST_CLIENT_VERSION)
    }
}

// =========================================================
// Announcements
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListAnnouncements(pub AnnouncementQuery);

impl ApiRequest for ListAnnouncements {
    type Response = AnnouncementList;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_ANNOUNCEMENTS)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "page", self.0.page);
        push_opt(&mut pairs, "limit", self.0.limit);
        push_opt(&mut pairs, "pinned_first", self.0.pinned_first);
        pairs
    }
}

/// Single announcement by id
#[derive(Debug, Clone)]
pub struct AnnouncementDetail {
    pub id: String,
}

impl ApiRequest for AnnouncementDetail {
    type Response = Item<Announcement>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}/{}", crate::PATH_ANNOUNCEMENTS, self.id))
    }
}

// =========================================================
// Pass-through resources
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GetStats;

impl ApiRequest for GetStats {
    type Response = Stats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_STATS)
    }
}

/// Activities with every relation populated (`populate=*`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ListActivities;

impl ApiRequest for ListActivities {
    type Response = Activities;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_ACTIVITIES)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("populate", "*".to_string())]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListScreenshots;

impl ApiRequest for ListScreenshots {
    type Response = Screenshots;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_SCREENSHOTS)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetSiteConfig;

impl ApiRequest for GetSiteConfig {
    type Response = SiteConfig;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_SITE_CONFIG)
    }
}

// =========================================================
// Legacy notices
// =========================================================

/// Legacy notice list, every item wrapped in an `attributes` envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct ListNotices;

impl ApiRequest for ListNotices {
    type Response = DataList<Envelope<Notice>>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(crate::PATH_NOTICES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_omitted() {
        let req = ListClientVersions(VersionQuery {
            page: Some(2),
            limit: None,
            active_only: Some(true),
        });
        assert_eq!(
            req.query(),
            vec![("page", "2".to_string()), ("active_only", "true".to_string())]
        );
        assert!(ListAnnouncements::default().query().is_empty());
    }

    #[test]
    fn announcement_query_order() {
        let req = ListAnnouncements(AnnouncementQuery {
            page: Some(1),
            limit: Some(10),
            pinned_first: Some(false),
        });
        assert_eq!(
            req.query(),
            vec![
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("pinned_first", "false".to_string()),
            ]
        );
    }

    #[test]
    fn detail_path_embeds_id() {
        let req = AnnouncementDetail { id: "42".into() };
        assert_eq!(req.path(), "/api/announcements/42");
    }

    #[test]
    fn activities_populate_everything() {
        assert_eq!(ListActivities.path(), "/api/activities");
        assert_eq!(ListActivities.query(), vec![("populate", "*".to_string())]);
    }
}

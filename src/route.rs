//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了站点的所有路由，以及"首次访问才加载"的懒加载记录。

use std::collections::HashSet;
use std::fmt::Display;

/// 站点路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 视频页 (懒加载)
    Video,
    /// 公告页 (懒加载)
    Notice,
    /// 未匹配
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略 query / fragment 和结尾的 `/`。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/video" => Self::Video,
            "/notice" => Self::Notice,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Video => "/video",
            Self::Notice => "/notice",
            Self::NotFound => "/404",
        }
    }

    /// 路由名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Video => "video",
            Self::Notice => "notice",
            Self::NotFound => "not-found",
        }
    }

    /// 是否在首次访问时才加载
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Video | Self::Notice)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 一次导航的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AppRoute,
    pub to: AppRoute,
    /// 懒加载路由第一次被访问，此时需要加载它的视图
    pub first_visit: bool,
}

/// 路由状态机
///
/// 没有守卫、没有重定向、没有嵌套路由：URL 决定状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    current: AppRoute,
    loaded: HashSet<AppRoute>,
}

impl RouteState {
    /// 以初始 URL 创建
    pub fn new(initial_path: &str) -> Self {
        let mut state = Self {
            current: AppRoute::Home,
            loaded: HashSet::new(),
        };
        state.enter(AppRoute::from_path(initial_path));
        state
    }

    pub fn current(&self) -> AppRoute {
        self.current
    }

    /// 导航到指定 path
    pub fn navigate(&mut self, path: &str) -> Transition {
        self.enter(AppRoute::from_path(path))
    }

    fn enter(&mut self, to: AppRoute) -> Transition {
        let from = self.current;
        let first_visit = to.is_lazy() && self.loaded.insert(to);
        self.current = to;

        Transition {
            from,
            to,
            first_visit,
        }
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::new(AppRoute::Home.to_path())
    }
}

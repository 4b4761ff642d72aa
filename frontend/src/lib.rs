//! 星际云存档官网前端
//!
//! 采用 Context-Driven 架构：
//! - `context`: API 入口（`SiteApi` + fetch 传输层）
//! - `store`: 全局状态（计数器、通知列表、详情弹窗）
//! - `web::router`: 路由服务（History API）
//! - `components`: 页面组件

mod context;
mod store;
mod components {
    pub mod home;
    mod json_view;
    pub mod notice;
    mod notice_board;
    pub mod video;
}

pub(crate) mod web;

use crate::components::home::HomePage;
use crate::components::notice::NoticePage;
use crate::components::video::VideoPage;
use crate::context::create_api;
use crate::store::{StoreContext, init_store};

use cloudsave::AppRoute;
use leptos::prelude::*;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 视频页和公告页的组件只在路由命中时才创建，数据也随之请求。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Video => view! { <VideoPage /> }.into_any(),
        AppRoute::Notice => view! { <NoticePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[50vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API 入口
    let api = create_api();
    provide_context(api.clone());

    // 2. 全局状态，通知列表只在这里抓取一次
    let store = StoreContext::new();
    provide_context(store);
    init_store(&store, api);

    view! {
        <Router>
            <div class="min-h-screen bg-base-200 font-sans">
                <div class="navbar bg-base-100 shadow-xl">
                    <div class="flex-1">
                        <Link to="/">
                            <span class="btn btn-ghost text-xl">"星际云存档"</span>
                        </Link>
                    </div>
                    <ul class="menu menu-horizontal px-1">
                        <li>
                            <Link to="/">"首页"</Link>
                        </li>
                        <li>
                            <Link to="/video">"视频"</Link>
                        </li>
                        <li>
                            <Link to="/notice">"公告"</Link>
                        </li>
                    </ul>
                </div>
                <main class="max-w-7xl mx-auto p-4 md:p-8">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}

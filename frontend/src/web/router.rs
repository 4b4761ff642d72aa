//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 状态转换本身由核心库的 `RouteState` 完成，这里只负责把它接到浏览器上。

use cloudsave::{AppRoute, RouteState, Transition};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn log_transition(transition: &Transition) {
    log::debug!("[Router] {} -> {}", transition.from.name(), transition.to.name());
    if transition.first_visit {
        log::debug!("[Router] Loading view for {} on first visit", transition.to.name());
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    state: RwSignal<RouteState>,
    // 只在路由真正变化时通知，同一路由的重复导航不会重建页面
    current: Memo<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let state = RwSignal::new(RouteState::new(&current_path()));
        Self {
            state,
            current: Memo::new(move |_| state.with(RouteState::current)),
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> Signal<AppRoute> {
        self.current.into()
    }

    /// 导航到指定路径
    pub fn navigate(&self, path: &str) {
        let Some(transition) = self.state.try_update(|s| s.navigate(path)) else {
            return;
        };

        // 未匹配时保留用户输入的地址，交给外层展示 404
        let url = match transition.to {
            AppRoute::NotFound => path,
            route => route.to_path(),
        };
        if transition.from != transition.to {
            push_history_state(url);
        }

        log_transition(&transition);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let state = self.state;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            if let Some(transition) = state.try_update(|s| s.navigate(&path)) {
                log_transition(&transition);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。懒加载路由的视图只在被访问时才创建。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let current = router.current_route();

    move || matcher(current.get())
}

/// 站内链接，拦截点击改为 pushState 导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to on:click=on_click>
            {children()}
        </a>
    }
}

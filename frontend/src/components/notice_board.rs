use crate::store::use_store;
use cloudsave::LoadState;
use leptos::prelude::*;

/// 通知列表（数据来自全局状态，只抓取一次）
#[component]
pub fn NoticeList() -> impl IntoView {
    let store = use_store();
    let notices = store.notices();
    let load_state = store.load_state();

    let list = move || {
        let items = notices.get();
        if items.is_empty() {
            return view! { <p class="text-base-content/60">"暂无通知"</p> }.into_any();
        }

        items
            .into_iter()
            .map(|notice| {
                let title = notice.title().unwrap_or("(无标题)").to_string();
                let date = notice.published().map(|d| d.date_label()).unwrap_or_default();
                view! {
                    <li>
                        <a on:click=move |_| store.toggle_component(notice.clone())>
                            <span class="flex-1">{title}</span>
                            <span class="text-xs opacity-60">{date}</span>
                        </a>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"通知"</h2>
                {move || match load_state.get() {
                    LoadState::Idle | LoadState::Loading => {
                        view! { <span class="loading loading-dots loading-md"></span> }.into_any()
                    }
                    LoadState::Failed(e) => {
                        view! {
                            <div class="alert alert-warning">{format!("通知加载失败: {}", e)}</div>
                        }
                            .into_any()
                    }
                    LoadState::Loaded => view! { <ul class="menu w-full">{list}</ul> }.into_any(),
                }}
            </div>
        </div>
    }
}

/// 通知详情弹窗
#[component]
pub fn NoticeDetail() -> impl IntoView {
    let store = use_store();
    let visible = store.is_detail_visible();
    let current = store.current_notice();

    // 关闭同样走 toggle，保持可见性只由一处翻转
    let close = move |_| {
        if let Some(notice) = current.get_untracked() {
            store.toggle_component(notice);
        }
    };

    move || {
        visible.get().then(|| {
            let notice = current.get();
            let title = notice
                .as_ref()
                .and_then(|n| n.title())
                .unwrap_or_default()
                .to_string();
            let content = notice
                .as_ref()
                .and_then(|n| n.content())
                .unwrap_or_default()
                .to_string();
            let date = notice
                .as_ref()
                .and_then(|n| n.published())
                .map(|d| d.to_string())
                .unwrap_or_default();

            view! {
                <div class="modal modal-open">
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">{title}</h3>
                        <p class="text-xs opacity-60">{date}</p>
                        <p class="py-4 whitespace-pre-line">{content}</p>
                        <div class="modal-action">
                            <button class="btn" on:click=close>"关闭"</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

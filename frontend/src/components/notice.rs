use crate::components::notice_board::{NoticeDetail, NoticeList};
use crate::context::use_api;
use cloudsave::ApiResult;
use cloudsave::loader::load_announcements;
use cloudsave_shared::{AnnouncementList, AnnouncementQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;

const PAGE_SIZE: u32 = 10;

/// 公告页：分页公告 + 全局通知
#[component]
pub fn NoticePage() -> impl IntoView {
    let api = use_api();
    let (page, set_page) = signal(1u32);
    let (data, set_data) = signal(Option::<ApiResult<AnnouncementList>>::None);

    // 页码变化时重新请求
    Effect::new(move |_| {
        let query = AnnouncementQuery {
            page: Some(page.get()),
            limit: Some(PAGE_SIZE),
            pinned_first: Some(true),
        };
        let api = api.clone();
        set_data.set(None);
        spawn_local(async move {
            let result = load_announcements(&api, query).await;
            set_data.set(Some(result));
        });
    });

    let total_pages = move || {
        data.with(|d| match d {
            Some(Ok(list)) => list.pagination.as_ref().map_or(1, |p| p.total_pages.max(1)),
            _ => 1,
        })
    };

    let announcements = move || match data.get() {
        None => view! { <span class="loading loading-spinner loading-md"></span> }.into_any(),
        Some(Err(e)) => {
            view! { <div class="alert alert-error">{format!("公告加载失败: {}", e)}</div> }
                .into_any()
        }
        Some(Ok(list)) if list.data.is_empty() => {
            view! { <p class="text-base-content/60">"暂无公告"</p> }.into_any()
        }
        Some(Ok(list)) => list
            .data
            .into_iter()
            .map(|a| {
                let date = a.published().map(|d| d.to_string()).unwrap_or_default();
                view! {
                    <article class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">
                                {a.content.title}
                                {a.is_pinned.then(|| view! { <span class="badge badge-secondary">"置顶"</span> })}
                            </h3>
                            <p class="text-xs opacity-60">{date}</p>
                            <p class="whitespace-pre-line">{a.content.body}</p>
                        </div>
                    </article>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <section class="md:col-span-2 space-y-4">
                <h2 class="text-2xl font-bold">"公告"</h2>
                {announcements}
                <div class="join">
                    <button
                        class="join-item btn"
                        disabled=move || page.get() <= 1
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "«"
                    </button>
                    <button class="join-item btn btn-disabled">
                        {move || format!("{} / {}", page.get(), total_pages())}
                    </button>
                    <button
                        class="join-item btn"
                        disabled=move || page.get() >= total_pages()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "»"
                    </button>
                </div>
            </section>
            <NoticeList />
            <NoticeDetail />
        </div>
    }
}

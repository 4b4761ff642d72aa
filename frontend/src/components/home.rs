use crate::components::json_view::json_entries;
use crate::components::notice_board::{NoticeDetail, NoticeList};
use crate::context::use_api;
use crate::store::use_store;
use cloudsave::ApiResult;
use cloudsave::loader::{HomeData, load_home};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let (data, set_data) = signal(Option::<ApiResult<HomeData>>::None);

    spawn_local(async move {
        let result = load_home(&api).await;
        set_data.set(Some(result));
    });

    view! {
        <div class="space-y-8">
            {move || match data.get() {
                None => {
                    view! {
                        <div class="flex justify-center p-12">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                        .into_any()
                }
                Some(Err(e)) => {
                    view! { <div class="alert alert-error">{format!("首页加载失败: {}", e)}</div> }
                        .into_any()
                }
                Some(Ok(home)) => view! { <HomeSummary data=home /> }.into_any(),
            }}
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <div class="md:col-span-2">
                    <NoticeList />
                </div>
                <Counter />
            </div>
            <NoticeDetail />
        </div>
    }
}

#[component]
fn HomeSummary(data: HomeData) -> impl IntoView {
    let HomeData {
        latest_version,
        announcements,
        stats,
        site_config,
    } = data;

    let released = latest_version
        .published()
        .map(|d| format!("发布于 {}", d.date_label()))
        .unwrap_or_default();
    let download = latest_version.download_url.clone().map(|url| {
        view! { <a class="btn btn-primary" href=url>"下载客户端"</a> }
    });
    let notes = latest_version.release_notes.clone().unwrap_or_default();

    let announcement_items = announcements
        .into_iter()
        .map(|a| {
            let date = a.published().map(|d| d.date_label()).unwrap_or_default();
            view! {
                <li class="flex gap-2 py-1">
                    {a.is_pinned.then(|| view! { <span class="badge badge-secondary">"置顶"</span> })}
                    <span class="flex-1">{a.content.title}</span>
                    <span class="text-xs opacity-60">{date}</span>
                </li>
            }
        })
        .collect_view();

    let stat_items = json_entries(&stats)
        .into_iter()
        .map(|(key, value)| {
            view! {
                <div class="stat">
                    <div class="stat-title">{key}</div>
                    <div class="stat-value text-2xl">{value}</div>
                </div>
            }
        })
        .collect_view();

    let config_items = json_entries(&site_config)
        .into_iter()
        .map(|(key, value)| {
            view! {
                <tr>
                    <td class="font-mono text-xs">{key}</td>
                    <td>{value}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="hero bg-base-100 rounded-box shadow-xl">
            <div class="hero-content flex-col items-start">
                <h1 class="text-4xl font-bold">"星际云存档"</h1>
                <p>
                    "最新版本 " <span class="badge badge-primary">{latest_version.version}</span>
                    " " <span class="text-sm opacity-60">{released}</span>
                </p>
                <p class="whitespace-pre-line text-sm">{notes}</p>
                {download}
            </div>
        </div>

        <div class="stats stats-vertical md:stats-horizontal shadow w-full">{stat_items}</div>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"公告"</h2>
                    <ul>{announcement_items}</ul>
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"站点信息"</h2>
                    <table class="table table-sm">
                        <tbody>{config_items}</tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

/// 全局计数器
#[component]
fn Counter() -> impl IntoView {
    let store = use_store();
    let count = store.count();
    let double = store.double_count();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center">
                <div class="stat-value">{move || count.get()}</div>
                <div class="text-sm opacity-60">"x2 = " {move || double.get()}</div>
                <button class="btn btn-outline btn-sm" on:click=move |_| store.increment()>
                    "+1"
                </button>
            </div>
        </div>
    }
}

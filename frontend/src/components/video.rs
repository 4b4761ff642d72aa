use crate::components::json_view::{json_items, text_field};
use crate::context::use_api;
use cloudsave::ApiResult;
use cloudsave::loader::{VideoData, load_video};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 视频页：活动与截图
///
/// 首次进入路由时才创建，数据在创建时请求。
#[component]
pub fn VideoPage() -> impl IntoView {
    let api = use_api();
    let (data, set_data) = signal(Option::<ApiResult<VideoData>>::None);

    spawn_local(async move {
        let result = load_video(&api).await;
        set_data.set(Some(result));
    });

    move || match data.get() {
        None => view! {
            <div class="flex justify-center p-12">
                <span class="loading loading-spinner loading-lg"></span>
            </div>
        }
        .into_any(),
        Some(Err(e)) => {
            view! { <div class="alert alert-error">{format!("视频页加载失败: {}", e)}</div> }
                .into_any()
        }
        Some(Ok(video)) => view! { <VideoContent data=video /> }.into_any(),
    }
}

#[component]
fn VideoContent(data: VideoData) -> impl IntoView {
    let activities = json_items(&data.activities)
        .into_iter()
        .map(|item| {
            let title = text_field(&item, &["title", "name"]).unwrap_or_else(|| "活动".to_string());
            let description = text_field(&item, &["description", "summary"]).unwrap_or_default();
            let link = text_field(&item, &["url", "link", "videoUrl"]);
            view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">{title}</h3>
                        <p>{description}</p>
                        {link.map(|url| {
                            view! {
                                <div class="card-actions justify-end">
                                    <a class="btn btn-primary btn-sm" href=url target="_blank">"观看"</a>
                                </div>
                            }
                        })}
                    </div>
                </div>
            }
        })
        .collect_view();

    let screenshots = json_items(&data.screenshots)
        .into_iter()
        .filter_map(|item| {
            let src = text_field(&item, &["url", "image", "src"])?;
            let alt = text_field(&item, &["title", "name"]).unwrap_or_default();
            Some(view! { <img class="rounded-box shadow" src=src alt=alt /> })
        })
        .collect_view();

    view! {
        <div class="space-y-8">
            <h2 class="text-2xl font-bold">"活动"</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">{activities}</div>
            <h2 class="text-2xl font-bold">"截图"</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">{screenshots}</div>
        </div>
    }
}

//! 应用状态上下文
//!
//! 在 `App` 启动时创建一次并通过 Context 提供给各页面，
//! 生命周期与应用相同。公告列表在创建时抓取，只抓取一次。

use crate::context::Api;
use cloudsave::{LoadState, NoticeBoard};
use cloudsave_shared::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct StoreContext {
    board: RwSignal<NoticeBoard>,
}

impl StoreContext {
    pub fn new() -> Self {
        Self {
            board: RwSignal::new(NoticeBoard::new()),
        }
    }

    pub fn increment(&self) {
        self.board.update(NoticeBoard::increment);
    }

    pub fn count(&self) -> Signal<i64> {
        let board = self.board;
        Signal::derive(move || board.with(NoticeBoard::count))
    }

    pub fn double_count(&self) -> Signal<i64> {
        let board = self.board;
        Signal::derive(move || board.with(NoticeBoard::double_count))
    }

    pub fn notices(&self) -> Signal<Vec<Notice>> {
        let board = self.board;
        Signal::derive(move || board.with(|b| b.notices().to_vec()))
    }

    pub fn load_state(&self) -> Signal<LoadState> {
        let board = self.board;
        Signal::derive(move || board.with(|b| b.load_state().clone()))
    }

    pub fn current_notice(&self) -> Signal<Option<Notice>> {
        let board = self.board;
        Signal::derive(move || board.with(|b| b.current_notice().cloned()))
    }

    pub fn is_detail_visible(&self) -> Signal<bool> {
        let board = self.board;
        Signal::derive(move || board.with(NoticeBoard::is_detail_visible))
    }

    /// 设置当前公告并切换详情弹窗
    pub fn toggle_component(&self, notice: Notice) {
        self.board.update(|b| b.toggle_component(notice));
    }
}

impl Default for StoreContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 抓取公告列表
///
/// 已经抓取过（或正在抓取）时直接返回。
pub fn init_store(ctx: &StoreContext, api: Api) {
    let should_fetch = ctx.board.try_update(NoticeBoard::begin_load).unwrap_or(false);
    if !should_fetch {
        return;
    }

    let board = ctx.board;
    spawn_local(async move {
        let result = api.notices().list().await;
        board.update(|b| b.finish_load(result));
    });
}

/// 从 Context 获取应用状态
pub fn use_store() -> StoreContext {
    use_context::<StoreContext>().expect("StoreContext should be provided")
}

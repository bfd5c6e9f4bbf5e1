//! Infinite-scrolling news list widget.
//!
//! Resets to page 1 on every selection change, appends pages as the
//! sentinel element scrolls into view, and opens a detail overlay when an
//! article is clicked. The page cursor only advances on a non-empty
//! successful response.

use dioxus::prelude::*;
use dioxus_logger::tracing::warn;
use pulse_api::models::{NewsDetail, NewsItem, NewsListPage};
use pulse_api::{endpoints, ApiClient, PendingRequest};
use pulse_core::dates::display_date;
use pulse_core::{ListPaging, ResultCache, Selection};
use pulse_ui::bus::SelectionEvent;
use pulse_ui::components::{ErrorDisplay, LoadingSpinner, SectionHeader};
use pulse_ui::dom;
use pulse_ui::state::DashboardState;

use crate::config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Every signal the list's load path touches, copyable into async tasks.
#[derive(Clone, Copy)]
struct ListHandles {
    phase: Signal<Phase>,
    error_msg: Signal<Option<String>>,
    items: Signal<Vec<NewsItem>>,
    paging: Signal<ListPaging>,
    cache: Signal<ResultCache<NewsListPage>>,
    pending: Signal<PendingRequest>,
}

#[component]
pub fn NewsListWidget() -> Element {
    let state = use_context::<DashboardState>();

    let phase = use_signal(|| Phase::Idle);
    let error_msg = use_signal(|| None::<String>);
    let items = use_signal(Vec::new);
    let paging = use_signal(|| ListPaging::new(config::PAGE_SIZE));
    let cache = use_signal(ResultCache::<NewsListPage>::new);
    let pending = use_signal(PendingRequest::new);
    let mut applied = use_signal(|| None::<Selection>);

    let mut detail = use_signal(|| None::<NewsDetail>);
    let mut detail_pending = use_signal(PendingRequest::new);

    let mut scroll_seq = use_signal(|| 0u64);
    let mut observing = use_signal(|| false);

    let mut handles = ListHandles {
        phase,
        error_msg,
        items,
        paging,
        cache,
        pending,
    };

    // Selection changes arrive over the event bus (chart clicks, filter
    // edits, history navigation); the guard skips events that did not
    // actually change the fields this widget scopes by.
    use_effect(move || {
        let (_, event) = state.bus.latest();
        let selection = state.selection.peek().clone();
        if !selection.has_query() {
            handles.phase.set(Phase::Idle);
            return;
        }
        if applied.peek().as_ref() == Some(&selection) {
            return;
        }
        applied.set(Some(selection.clone()));

        // Filter edits invalidate every cached page; moving between
        // buckets or through history keeps them, so returning to a
        // previously viewed date renders from cache.
        match event {
            Some(SelectionEvent::FilterChanged) => handles.cache.write().clear(),
            Some(SelectionEvent::DateClicked { .. }) | Some(SelectionEvent::Navigated) | None => {}
        }

        handles.items.write().clear();
        handles.paging.write().reset();
        handles.error_msg.set(None);
        load_page(handles, selection);
    });

    // Sentinel visibility drives load_more; guarded so a trigger while a
    // fetch is in flight or past the last page is a no-op.
    use_effect(move || {
        let seq = scroll_seq();
        if seq == 0 {
            return;
        }
        let loading = *handles.phase.peek() == Phase::Loading;
        if !handles.paging.peek().should_load(loading) {
            return;
        }
        let Some(selection) = applied.peek().clone() else {
            return;
        };
        load_page(handles, selection);
    });

    // Attach the IntersectionObserver once the sentinel exists.
    use_effect(move || {
        if *observing.peek() {
            return;
        }
        let attached = dom::observe_visibility(
            config::LIST_SENTINEL_ID,
            config::SCROLL_ROOT_MARGIN,
            move || {
                let next = *scroll_seq.peek() + 1;
                scroll_seq.set(next);
            },
        )
        .is_some();
        observing.set(attached);
    });

    let open_detail = move |id: u64| {
        spawn(async move {
            let client = ApiClient::new(config::api_base());
            let signal = detail_pending.write().begin();
            match client
                .get_json::<NewsDetail>(&endpoints::news_detail_path(id), &[], signal.as_ref())
                .await
            {
                Ok(article) => detail.set(Some(article)),
                Err(err) if err.is_superseded() => {}
                Err(err) => warn!("news detail fetch failed: {err}"),
            }
        });
    };

    let current_phase = *phase.read();
    let paging_now = *paging.read();
    let list = items.read().clone();
    let scope_label = applied
        .read()
        .as_ref()
        .and_then(|sel| sel.effective_range())
        .map(|(start, end)| {
            if start == end {
                display_date(&start)
            } else {
                format!("{} – {}", display_date(&start), display_date(&end))
            }
        });
    let caption = (current_phase == Phase::Ready || !list.is_empty()).then(|| {
        match scope_label {
            Some(scope) => format!("{} articles · {scope}", paging_now.total),
            None => format!("{} articles", paging_now.total),
        }
    });

    rsx! {
        section {
            SectionHeader {
                title: "Articles".to_string(),
                subtitle: caption,
            }

            if current_phase == Phase::Error {
                if let Some(msg) = error_msg.read().as_ref() {
                    ErrorDisplay { message: msg.clone() }
                }
            }

            div {
                id: "news-list",
                for item in list.iter() {
                    div {
                        key: "{item.id}",
                        style: "background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px 16px; margin-bottom: 12px; cursor: pointer;",
                        onclick: {
                            let id = item.id;
                            move |_| open_detail(id)
                        },
                        div {
                            style: "display: flex; justify-content: space-between; gap: 12px;",
                            h3 {
                                style: "margin: 0 0 6px 0; font-size: 15px; color: #111827;",
                                "{item.title}"
                            }
                            span {
                                style: "font-size: 12px; color: #6b7280; white-space: nowrap;",
                                "{item.date}"
                            }
                        }
                        div {
                            style: "display: flex; justify-content: space-between; font-size: 13px; color: #6b7280;",
                            span { "{item.press}" }
                            a {
                                href: "{item.link}",
                                target: "_blank",
                                style: "color: #2563eb;",
                                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                                "Source ↗"
                            }
                        }
                    }
                }

                if current_phase == Phase::Ready && list.is_empty() {
                    div {
                        style: "text-align: center; padding: 32px; color: #6b7280;",
                        "No news found for this scope."
                    }
                }

                if current_phase == Phase::Loading {
                    LoadingSpinner { message: "Loading articles...".to_string() }
                }

                if !paging_now.has_next && !list.is_empty() {
                    div {
                        style: "text-align: center; padding: 16px; color: #9ca3af; font-size: 13px;",
                        "You're all caught up."
                    }
                }

                // Sentinel stays after the last rendered item so scrolling
                // keeps triggering after every append.
                div { id: config::LIST_SENTINEL_ID, style: "height: 1px;" }
            }
        }

        if let Some(article) = detail.read().as_ref() {
            DetailOverlay {
                article: article.clone(),
                on_close: move |_| detail.set(None),
            }
        }
    }
}

/// Load the current page for the given selection snapshot, cache first.
fn load_page(mut handles: ListHandles, selection: Selection) {
    let page = handles.paging.peek().page;
    let key = format!("{}|page{}", selection.cache_key(), page);

    let cached = handles.cache.peek().get(&key).cloned();
    if let Some(cached) = cached {
        // A hit renders synchronously; a stale in-flight page must not
        // land on top of it afterwards.
        handles.pending.write().cancel();
        apply_page(&mut handles, cached);
        return;
    }

    handles.phase.set(Phase::Loading);
    spawn(async move {
        let client = ApiClient::with_retry(config::api_base(), config::retry_policy());
        let page_size = handles.paging.peek().page_size;
        let params = endpoints::news_params(&selection, page, page_size);
        let signal = handles.pending.write().begin();
        let result = client
            .get_json_retry::<NewsListPage, _, _>(
                endpoints::NEWS,
                &params,
                signal.as_ref(),
                |_| true,
                |_, _| {},
            )
            .await;
        match result {
            Ok(page_data) => {
                if !page_data.news_list.is_empty() {
                    handles.cache.write().insert(key, page_data.clone());
                }
                apply_page(&mut handles, page_data);
            }
            Err(err) if err.is_superseded() => {}
            Err(err) => {
                warn!("news list fetch failed: {err}");
                handles.error_msg.set(Some(err.to_string()));
                handles.phase.set(Phase::Error);
            }
        }
    });
}

/// Append a page and advance the cursor; empty pages only latch the end.
fn apply_page(handles: &mut ListHandles, page: NewsListPage) {
    let received = page.news_list.len();
    handles.items.write().extend(page.news_list);
    handles
        .paging
        .write()
        .advance(received, page.total_count, page.has_next);
    handles.phase.set(Phase::Ready);
}

#[derive(Props, Clone, PartialEq)]
struct DetailOverlayProps {
    article: NewsDetail,
    on_close: EventHandler<()>,
}

/// Full-article overlay for a clicked list item.
#[component]
fn DetailOverlay(props: DetailOverlayProps) -> Element {
    let byline = match props.article.author.as_deref() {
        Some(author) if !author.is_empty() => format!("{} | {}", props.article.press, author),
        _ => props.article.press.clone(),
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 40;",
            onclick: move |_| props.on_close.call(()),
            div {
                style: "background: #fff; border-radius: 8px; max-width: 640px; width: 90%; max-height: 80vh; overflow-y: auto; padding: 24px;",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                a {
                    href: "{props.article.link}",
                    target: "_blank",
                    style: "font-size: 13px; color: #2563eb;",
                    "View original ↗"
                }
                h1 {
                    style: "margin: 8px 0; font-size: 20px; color: #111827;",
                    "{props.article.title}"
                }
                div {
                    style: "font-size: 13px; color: #6b7280; margin-bottom: 12px;",
                    "{byline}"
                }
                if let Some(image) = props.article.image.as_ref() {
                    img {
                        src: "{image}",
                        style: "width: 100%; border-radius: 4px; margin-bottom: 12px;",
                    }
                }
                div {
                    style: "font-size: 14px; line-height: 1.6; color: #1f2937; white-space: pre-line;",
                    "{props.article.content}"
                }
                button {
                    style: "margin-top: 16px; padding: 8px 16px; border: 1px solid #d1d5db; border-radius: 4px; background: #f9fafb; cursor: pointer;",
                    onclick: move |_| props.on_close.call(()),
                    "Close"
                }
            }
        }
    }
}

//! Timeline chart widget.
//!
//! Fetches the bucketed series for the current selection and renders it
//! through the D3 bridge. Point clicks come back as CustomEvents, get
//! debounced, expand week/month buckets into their date window, and are
//! published on the event bus; hovers fetch a per-point summary popup
//! with its own debounce and cache.

use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_logger::tracing::{info, warn};
use gloo_timers::future::TimeoutFuture;
use pulse_api::models::{ChartPoint, HoverSummary};
use pulse_api::{endpoints, ApiClient, PendingRequest};
use pulse_core::bucket::bucket_label;
use pulse_core::{dates, GroupBy, ResultCache, Selection, SelectionPatch};
use pulse_ui::bus::SelectionEvent;
use pulse_ui::components::{ChartContainer, ErrorDisplay, SectionHeader};
use pulse_ui::state::DashboardState;
use pulse_ui::{dom, js_bridge, url_state};

use crate::config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Rendered,
    Error,
}

/// The chart's fetch scope: the full selection minus the single clicked
/// date. Clicking a point must not re-scope the series it was clicked on.
fn scope_key(selection: &Selection) -> String {
    let mut scoped = selection.clone();
    scoped.date = None;
    scoped.cache_key()
}

fn hover_key(selection: &Selection, date: &str) -> String {
    format!("{date}|{}|{}", selection.group_by, selection.query)
}

#[component]
pub fn ChartWidget() -> Element {
    let state = use_context::<DashboardState>();

    let mut phase = use_signal(|| Phase::Idle);
    let mut status = use_signal(|| String::from("Loading chart..."));
    let mut error_msg = use_signal(|| None::<String>);
    let mut series = use_signal(Vec::<ChartPoint>::new);
    let mut series_cache = use_signal(ResultCache::<Vec<ChartPoint>>::new);
    let mut pending = use_signal(PendingRequest::new);
    let mut last_scope = use_signal(String::new);
    let mut refresh = use_signal(|| 0u64);

    let mut hover_cache = use_signal(ResultCache::<HoverSummary>::new);
    let mut hover_pending = use_signal(PendingRequest::new);
    let mut last_group = use_signal(|| None::<GroupBy>);

    // Raw interaction streams from the JS asset, sequence-numbered so a
    // repeat of the same payload still fires.
    let mut click_stream = use_signal(|| (0u64, String::new()));
    let mut hover_stream = use_signal(|| (0u64, String::new(), 0.0f64, 0.0f64));
    let mut leave_seq = use_signal(|| 0u64);

    // Register the CustomEvent listeners once; they write into the
    // streams and the effects below do the rest inside the runtime.
    use_effect(move || {
        dom::on_custom_event("pulse-point-click", move |event| {
            if let Some(date) = dom::detail_str(&event, "date") {
                let seq = click_stream.peek().0 + 1;
                click_stream.set((seq, date));
            }
        });
        dom::on_custom_event("pulse-point-hover", move |event| {
            if let (Some(date), Some(x), Some(y)) = (
                dom::detail_str(&event, "date"),
                dom::detail_f64(&event, "x"),
                dom::detail_f64(&event, "y"),
            ) {
                let seq = hover_stream.peek().0 + 1;
                hover_stream.set((seq, date, x, y));
            }
        });
        dom::on_custom_event("pulse-point-leave", move |_event| {
            let seq = *leave_seq.peek() + 1;
            leave_seq.set(seq);
        });
    });

    // Series fetch: reacts to query/range/granularity changes and the
    // retry trigger, cache first.
    use_effect(move || {
        let _ = refresh();
        let selection = (state.selection)();
        if !selection.has_query() {
            phase.set(Phase::Idle);
            return;
        }
        let scope = scope_key(&selection);
        if *last_scope.peek() == scope {
            return;
        }
        last_scope.set(scope.clone());

        // Hover popups cached under the old granularity are stale.
        if last_group.peek().map_or(true, |g| g != selection.group_by) {
            last_group.set(Some(selection.group_by));
            hover_cache.write().clear();
        }

        if let Some(points) = series_cache.peek().get(&scope).cloned() {
            // A hit renders synchronously; a stale in-flight fetch must
            // not land on top of it afterwards.
            pending.write().cancel();
            series.set(points);
            phase.set(Phase::Rendered);
            return;
        }

        phase.set(Phase::Loading);
        status.set(String::from("Loading chart..."));
        error_msg.set(None);
        spawn(async move {
            let client = ApiClient::with_retry(config::api_base(), config::retry_policy());
            let params = endpoints::chart_params(&selection);
            let signal = pending.write().begin();
            let result = client
                .get_json_retry::<Vec<ChartPoint>, _, _>(
                    endpoints::CHART,
                    &params,
                    signal.as_ref(),
                    |_| true,
                    move |attempt, max| {
                        if attempt > 1 {
                            status.set(format!("Loading chart... (attempt {attempt}/{max})"));
                        }
                    },
                )
                .await;
            match result {
                Ok(points) => {
                    info!("chart series loaded: {} buckets", points.len());
                    series_cache.write().insert(scope, points.clone());
                    series.set(points);
                    phase.set(Phase::Rendered);
                }
                Err(err) if err.is_superseded() => {}
                Err(err) => {
                    warn!("chart fetch failed: {err}");
                    error_msg.set(Some(err.to_string()));
                    phase.set(Phase::Error);
                }
            }
        });
    });

    // Redraw whenever the series or the selected point changes.
    use_effect(move || {
        if *phase.read() != Phase::Rendered {
            return;
        }
        let points = series.read();
        if points.is_empty() {
            js_bridge::destroy_chart(config::CHART_CONTAINER_ID);
            return;
        }
        let selection = (state.selection)();
        let data_json = serde_json::to_string(&*points).unwrap_or_default();
        let config_json = serde_json::json!({
            "color": "#3B82F6",
            "selectedDate": selection.date.map(|d| dates::format_date(&d)),
        })
        .to_string();
        js_bridge::render_timeline_chart(config::CHART_CONTAINER_ID, &data_json, &config_json);
    });

    // Debounced click handling: only the newest click within the window
    // fires, and clicking the already-selected bucket is a no-op.
    use_effect(move || {
        let (seq, date) = click_stream();
        if seq == 0 {
            return;
        }
        spawn(async move {
            TimeoutFuture::new(config::CLICK_DEBOUNCE_MS).await;
            if click_stream.peek().0 != seq {
                return;
            }
            let Ok(date) = dates::parse_date(&date) else {
                warn!("chart click carried an unparseable date: {date}");
                return;
            };
            publish_click(state, date);
        });
    });

    // Debounced hover handling with its own cache and abort handle.
    use_effect(move || {
        let (seq, date, x, y) = hover_stream();
        if seq == 0 {
            return;
        }
        let leave_mark = *leave_seq.peek();
        spawn(async move {
            TimeoutFuture::new(config::HOVER_DEBOUNCE_MS).await;
            if hover_stream.peek().0 != seq || *leave_seq.peek() != leave_mark {
                return;
            }
            let selection = state.selection.peek().clone();
            if !selection.has_query() {
                return;
            }
            let key = hover_key(&selection, &date);
            if let Some(cached) = hover_cache.peek().get(&key).cloned() {
                if let Ok(json) = serde_json::to_string(&cached) {
                    js_bridge::show_hover_popup(&json, x, y);
                }
                return;
            }
            let client = ApiClient::new(config::api_base());
            let signal = hover_pending.write().begin();
            let result = client
                .get_json::<HoverSummary>(
                    &endpoints::hover_summary_path(&date),
                    &endpoints::hover_summary_params(&selection),
                    signal.as_ref(),
                )
                .await;
            match result {
                Ok(summary) => {
                    hover_cache.write().insert(key, summary.clone());
                    // The cursor may have moved on while we fetched.
                    if hover_stream.peek().0 != seq || *leave_seq.peek() != leave_mark {
                        return;
                    }
                    if let Ok(json) = serde_json::to_string(&summary) {
                        js_bridge::show_hover_popup(&json, x, y);
                    }
                }
                Err(err) if err.is_superseded() => {}
                // Popup failures stay silent; the popup is an extra.
                Err(err) => warn!("hover summary fetch failed: {err}"),
            }
        });
    });

    // Leaving a point drops the pending fetch and removes the popup.
    use_effect(move || {
        let seq = leave_seq();
        if seq == 0 {
            return;
        }
        hover_pending.write().cancel();
        js_bridge::hide_hover_popup();
    });

    let selection = (state.selection)();
    let caption = selection
        .date
        .map(|d| format!("Selected: {}", bucket_label(selection.group_by, d)));
    let current_phase = *phase.read();

    rsx! {
        section {
            SectionHeader {
                title: "Coverage timeline".to_string(),
                subtitle: caption,
            }

            if current_phase == Phase::Error {
                if let Some(msg) = error_msg.read().as_ref() {
                    ErrorDisplay {
                        message: msg.clone(),
                        on_retry: move |_| {
                            last_scope.set(String::new());
                            let next = *refresh.peek() + 1;
                            refresh.set(next);
                        },
                    }
                }
            }

            if current_phase == Phase::Rendered && series.read().is_empty() {
                div {
                    style: "text-align: center; padding: 24px; color: #6b7280;",
                    "No coverage found for this scope."
                }
            }

            ChartContainer {
                id: config::CHART_CONTAINER_ID.to_string(),
                loading: current_phase == Phase::Loading,
            }

            if current_phase == Phase::Loading {
                p {
                    style: "text-align: center; font-size: 12px; color: #6b7280; margin: 4px 0 0 0;",
                    "{status}"
                }
            }
        }
    }
}

/// Turn a debounced, deduped point click into a selection change and a
/// bus event. Week and month buckets expand into their full window; a
/// day click narrows to that day and drops any wider range.
fn publish_click(state: DashboardState, date: NaiveDate) {
    let mut state = state;
    let selection = state.selection.peek().clone();
    let (start, end) = selection.group_by.expand(date);
    let ranged = selection.group_by != GroupBy::Day;
    let patch = SelectionPatch {
        date: Some(Some(date)),
        start_date: Some(ranged.then_some(start)),
        end_date: Some(ranged.then_some(end)),
        ..Default::default()
    };
    let mut next = selection.clone();
    match next.apply(&patch) {
        Ok(true) => {
            state.selection.set(next.clone());
            url_state::write_selection(&next);
            state.bus.publish(SelectionEvent::DateClicked {
                date,
                start_date: next.start_date,
                end_date: next.end_date,
                group_by: next.group_by,
                query: next.query,
            });
        }
        // Same bucket already selected: idempotent no-op.
        Ok(false) => {}
        Err(err) => warn!("rejected chart click: {err}"),
    }
}

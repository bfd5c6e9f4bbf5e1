//! News Pulse dashboard.
//!
//! One page, three independently fetching widgets (timeline chart,
//! infinite news list, generated issue summary) sharing a single
//! selection: query, date, date range and granularity, reflected
//! into the URL and back.
//!
//! Control flow: user interaction (chart click, filter edit, search) →
//! selection updated → URL merged → event bus notifies subscribers → each
//! widget checks its own cache → on miss, the fetch client issues an
//! abortable request → render. The controller here owns the shared state
//! and injects it via context; widgets never reach into globals.

mod components;
mod config;

use dioxus::prelude::*;
use dioxus_logger::tracing::Level;
use pulse_core::{GroupBy, SelectionPatch};
use pulse_ui::bus::SelectionEvent;
use pulse_ui::components::{DateRangePicker, ErrorDisplay, GroupBySelector, SearchBar};
use pulse_ui::state::DashboardState;
use pulse_ui::{js_bridge, url_state};

use components::{ChartWidget, NewsListWidget, QuickSummaryWidget, SummaryWidget};

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("news-pulse-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| DashboardState::new(url_state::read_selection()));

    // One-time startup: chart scripts and the popstate listener.
    use_effect(move || {
        js_bridge::init_charts();
        url_state::on_popstate(move || {
            let navigated = url_state::read_selection();
            if *state.selection.peek() != navigated {
                state.selection.set(navigated);
                state.bus.publish(SelectionEvent::Navigated);
            }
        });
    });

    // Merge a partial change into the shared selection. Rejected updates
    // leave the selection (and therefore the bound inputs) untouched and
    // surface a validation message instead.
    let mut apply_patch = move |patch: SelectionPatch| {
        let mut next = state.selection.peek().clone();
        match next.apply(&patch) {
            Ok(true) => {
                state.validation_msg.set(None);
                state.selection.set(next);
                url_state::write_selection(&state.selection.peek());
                state.bus.publish(SelectionEvent::FilterChanged);
            }
            Ok(false) => state.validation_msg.set(None),
            Err(err) => state.validation_msg.set(Some(err.to_string())),
        }
    };

    let selection = (state.selection)();
    let start_value = selection
        .start_date
        .map(|d| pulse_core::dates::format_date(&d))
        .unwrap_or_default();
    let end_value = selection
        .end_date
        .map(|d| pulse_core::dates::format_date(&d))
        .unwrap_or_default();

    rsx! {
        style { {PAGE_CSS} }
        div {
            style: "max-width: 1080px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; justify-content: space-between; align-items: center; gap: 16px; flex-wrap: wrap; margin-bottom: 12px;",
                h1 {
                    style: "margin: 0; font-size: 24px; color: #111827;",
                    "News Pulse"
                }
                SearchBar {
                    value: selection.query.clone(),
                    on_search: move |query: String| {
                        apply_patch(SelectionPatch {
                            query: Some(query),
                            date: Some(None),
                            start_date: Some(None),
                            end_date: Some(None),
                            ..Default::default()
                        });
                    },
                }
            }

            if let Some(msg) = state.validation_msg.read().as_ref() {
                ErrorDisplay { message: msg.clone() }
            }

            div {
                style: "display: flex; gap: 24px; align-items: center; flex-wrap: wrap; padding: 8px 0; border-bottom: 1px solid #e5e7eb; margin-bottom: 16px;",
                GroupBySelector {
                    value: selection.group_by,
                    on_change: move |group_by: GroupBy| {
                        apply_patch(SelectionPatch {
                            group_by: Some(group_by),
                            ..Default::default()
                        });
                    },
                }
                DateRangePicker {
                    start_date: start_value,
                    end_date: end_value,
                    on_start_change: move |value: String| {
                        apply_patch(SelectionPatch {
                            start_date: Some(pulse_core::dates::parse_date(&value).ok()),
                            ..Default::default()
                        });
                    },
                    on_end_change: move |value: String| {
                        apply_patch(SelectionPatch {
                            end_date: Some(pulse_core::dates::parse_date(&value).ok()),
                            ..Default::default()
                        });
                    },
                }
            }

            if selection.has_query() {
                QuickSummaryWidget {}
                ChartWidget {}
                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 24px; margin-top: 16px;",
                    SummaryWidget {}
                    NewsListWidget {}
                }
            } else {
                div {
                    style: "text-align: center; padding: 64px 0; color: #6b7280;",
                    "Search for a topic to see its coverage over time."
                }
            }
        }
    }
}

const PAGE_CSS: &str = r#"
@keyframes spin { to { transform: rotate(360deg); } }
"#;

//! Generated issue summary widget.
//!
//! Renders the three summary sections for the current selection. The
//! backend answers `{"is_error": true}` while generation is still in
//! progress, so the fetch runs through the bounded retry loop with an
//! attempt counter; exhausting it leaves an inline error with a retry
//! button, never a stuck loading state.

use dioxus::prelude::*;
use dioxus_logger::tracing::warn;
use pulse_api::models::IssueSummary;
use pulse_api::{endpoints, ApiClient, PendingRequest};
use pulse_core::{ResultCache, Selection};
use pulse_ui::components::{ErrorDisplay, LoadingSpinner, SectionHeader};
use pulse_ui::state::DashboardState;
use pulse_ui::url_state;

use crate::config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Rendered,
    Error,
}

#[derive(Clone, Copy)]
struct SummaryHandles {
    phase: Signal<Phase>,
    status: Signal<String>,
    error_msg: Signal<Option<String>>,
    summary: Signal<Option<IssueSummary>>,
    cache: Signal<ResultCache<IssueSummary>>,
    pending: Signal<PendingRequest>,
}

#[component]
pub fn SummaryWidget() -> Element {
    let state = use_context::<DashboardState>();

    let phase = use_signal(|| Phase::Idle);
    let status = use_signal(|| String::from("Generating summary..."));
    let error_msg = use_signal(|| None::<String>);
    let summary = use_signal(|| None::<IssueSummary>);
    let cache = use_signal(ResultCache::<IssueSummary>::new);
    let pending = use_signal(PendingRequest::new);
    let mut applied = use_signal(|| None::<Selection>);

    let mut handles = SummaryHandles {
        phase,
        status,
        error_msg,
        summary,
        cache,
        pending,
    };

    // Same subscription shape as the list: bus events, with a
    // field-by-field guard against redundant or duplicate notifications.
    use_effect(move || {
        let _ = state.bus.latest();
        let selection = state.selection.peek().clone();
        if !selection.has_query() {
            handles.phase.set(Phase::Idle);
            return;
        }
        if applied.peek().as_ref() == Some(&selection) {
            return;
        }
        applied.set(Some(selection.clone()));
        start_fetch(handles, selection);
    });

    let current_phase = *phase.read();
    let rendered = summary.read().clone();

    rsx! {
        section {
            SectionHeader {
                title: "Issue summary".to_string(),
            }

            if current_phase == Phase::Idle {
                div {
                    style: "color: #6b7280; padding: 16px 0;",
                    "Pick a point on the chart to summarize that period."
                }
            }

            if current_phase == Phase::Loading {
                LoadingSpinner { message: status.read().clone() }
            }

            if current_phase == Phase::Error {
                if let Some(msg) = error_msg.read().as_ref() {
                    ErrorDisplay {
                        message: msg.clone(),
                        on_retry: move |_| {
                            if let Some(selection) = applied.peek().clone() {
                                start_fetch(handles, selection);
                            }
                        },
                    }
                }
            }

            if current_phase == Phase::Rendered {
                if let Some(data) = rendered {
                    SummarySection { title: "Background".to_string(), body: section_text(&data.background) }
                    SummarySection { title: "Key developments".to_string(), body: section_text(&data.core_content) }
                    SummarySection { title: "Where things stand".to_string(), body: section_text(&data.conclusion) }
                }
            }
        }
    }
}

/// Fetch (or replay from cache) the summary for a selection snapshot.
fn start_fetch(mut handles: SummaryHandles, selection: Selection) {
    let key = selection.cache_key();
    if let Some(cached) = handles.cache.peek().get(&key).cloned() {
        // A hit renders synchronously; a stale in-flight fetch must not
        // land on top of it afterwards.
        handles.pending.write().cancel();
        handles.summary.set(Some(cached));
        handles.phase.set(Phase::Rendered);
        url_state::write_selection(&selection);
        return;
    }

    handles.phase.set(Phase::Loading);
    handles.status.set(String::from("Generating summary..."));
    handles.error_msg.set(None);
    spawn(async move {
        let client = ApiClient::with_retry(config::api_base(), config::retry_policy());
        let params = endpoints::summary_params(&selection);
        let signal = handles.pending.write().begin();
        let result = client
            .get_json_retry::<IssueSummary, _, _>(
                endpoints::SUMMARY,
                &params,
                signal.as_ref(),
                IssueSummary::is_ready,
                move |attempt, max| {
                    if attempt > 1 {
                        handles
                            .status
                            .set(format!("Generating summary... (attempt {attempt}/{max})"));
                    }
                },
            )
            .await;
        match result {
            Ok(data) => {
                handles.cache.write().insert(key, data.clone());
                handles.summary.set(Some(data));
                handles.phase.set(Phase::Rendered);
                url_state::write_selection(&selection);
            }
            Err(err) if err.is_superseded() => {}
            Err(err) => {
                warn!("summary fetch failed: {err}");
                handles.error_msg.set(Some(err.to_string()));
                handles.phase.set(Phase::Error);
            }
        }
    });
}

/// Sections tolerate an absent field with a placeholder.
fn section_text(value: &Option<String>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.clone(),
        _ => String::from("No information available."),
    }
}

#[derive(Props, Clone, PartialEq)]
struct SummarySectionProps {
    title: String,
    body: String,
}

#[component]
fn SummarySection(props: SummarySectionProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 16px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 14px; color: #374151;",
                "{props.title}"
            }
            p {
                style: "margin: 0; font-size: 14px; line-height: 1.6; color: #1f2937; white-space: pre-line;",
                "{props.body}"
            }
        }
    }
}

//! One-paragraph keyword summary shown above the chart.
//!
//! Scoped by the query alone, so it only refetches when the query itself
//! changes. No retry loop; a failure renders inline and the next search
//! tries again.

use dioxus::prelude::*;
use dioxus_logger::tracing::warn;
use pulse_api::models::QuickSummary;
use pulse_api::{endpoints, ApiClient, PendingRequest};
use pulse_core::ResultCache;
use pulse_ui::state::DashboardState;

use crate::config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Rendered,
    Error,
}

#[component]
pub fn QuickSummaryWidget() -> Element {
    let state = use_context::<DashboardState>();

    let mut phase = use_signal(|| Phase::Idle);
    let mut text = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut cache = use_signal(ResultCache::<String>::new);
    let mut pending = use_signal(PendingRequest::new);
    let mut applied = use_signal(String::new);

    use_effect(move || {
        let query = (state.selection)().query;
        if query.is_empty() {
            phase.set(Phase::Idle);
            return;
        }
        if *applied.peek() == query {
            return;
        }
        applied.set(query.clone());

        if let Some(cached) = cache.peek().get(&query).cloned() {
            pending.write().cancel();
            text.set(cached);
            phase.set(Phase::Rendered);
            return;
        }

        phase.set(Phase::Loading);
        error_msg.set(None);
        spawn(async move {
            let client = ApiClient::new(config::api_base());
            let params = endpoints::quick_summary_params(&query);
            let signal = pending.write().begin();
            match client
                .get_json::<QuickSummary>(endpoints::QUICK_SUMMARY, &params, signal.as_ref())
                .await
            {
                Ok(payload) => {
                    cache.write().insert(query, payload.summary.clone());
                    text.set(payload.summary);
                    phase.set(Phase::Rendered);
                }
                Err(err) if err.is_superseded() => {}
                Err(err) => {
                    warn!("quick summary fetch failed: {err}");
                    error_msg.set(Some(err.to_string()));
                    phase.set(Phase::Error);
                }
            }
        });
    });

    let query = (state.selection)().query;
    let current_phase = *phase.read();

    rsx! {
        div {
            style: "background: #eff6ff; border: 1px solid #bfdbfe; border-radius: 8px; padding: 12px 16px; margin-bottom: 16px;",
            strong {
                style: "color: #1d4ed8;",
                "{query}"
            }
            if current_phase == Phase::Loading {
                span {
                    style: "margin-left: 12px; color: #6b7280; font-size: 13px;",
                    "Summarizing this topic..."
                }
            }
            if current_phase == Phase::Error {
                span {
                    style: "margin-left: 12px; color: #dc2626; font-size: 13px;",
                    {error_msg.read().clone().unwrap_or_else(|| String::from("Summary unavailable."))}
                }
            }
            if current_phase == Phase::Rendered {
                span {
                    style: "margin-left: 12px; color: #1f2937; font-size: 14px;",
                    "{text}"
                }
            }
        }
    }
}

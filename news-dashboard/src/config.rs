//! Page-level configuration.
//!
//! Compile-time defaults, with the API base overridable at runtime via a
//! `window.NEWS_PULSE_API_BASE` global set by the host page.

use pulse_api::RetryPolicy;

/// Articles per news-list page.
pub const PAGE_SIZE: u32 = 10;

/// Debounce window for chart point clicks.
pub const CLICK_DEBOUNCE_MS: u32 = 300;

/// Debounce window for chart point hovers.
pub const HOVER_DEBOUNCE_MS: u32 = 150;

/// Root margin handed to the infinite-scroll observer.
pub const SCROLL_ROOT_MARGIN: &str = "100px";

/// DOM id for the D3 chart container div.
pub const CHART_CONTAINER_ID: &str = "timeline-chart";

/// DOM id for the infinite-scroll sentinel.
pub const LIST_SENTINEL_ID: &str = "news-list-sentinel";

/// Backend mount point: the host page's override, else the default.
pub fn api_base() -> String {
    read_global("NEWS_PULSE_API_BASE").unwrap_or_else(|| pulse_api::DEFAULT_API_BASE.to_string())
}

pub fn retry_policy() -> RetryPolicy {
    RetryPolicy::default()
}

fn read_global(key: &str) -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &key.into())
        .ok()
        .and_then(|value| value.as_string())
}

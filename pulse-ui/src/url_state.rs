//! Reflecting the shared selection into `location.search` and back.
//!
//! Every accepted selection change is merged into the existing query
//! string through a non-reloading `replaceState`. Writers merge rather
//! than overwrite, so parameters owned by nobody here (analytics tags,
//! tab state) survive. Multiple widgets write after their own renders;
//! last writer wins, which converges because all of them serialize the
//! same selection.

use pulse_core::selection::merge_into_query;
use pulse_core::Selection;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Parse the current `location.search` into a selection.
pub fn read_selection() -> Selection {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    Selection::from_query_string(&search)
}

/// Merge the selection's parameters into the current URL without a reload.
pub fn write_selection(selection: &Selection) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let (Ok(pathname), Ok(search)) = (location.pathname(), location.search()) else {
        return;
    };
    let merged = merge_into_query(&search, selection);
    let url = if merged.is_empty() {
        pathname
    } else {
        format!("{pathname}?{merged}")
    };
    if let Ok(history) = window.history() {
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("failed to update history: {err:?}");
        }
    }
}

/// Run `handler` on every browser history navigation. The listener lives
/// for the page session.
pub fn on_popstate(handler: impl FnMut() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| handler()));
    if window
        .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("failed to register popstate listener");
    }
    closure.forget();
}

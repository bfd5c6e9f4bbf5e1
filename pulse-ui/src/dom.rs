//! CustomEvent and IntersectionObserver interop.
//!
//! The chart JS asset talks back to Rust by dispatching CustomEvents on
//! `document`; the list widget watches a sentinel element to drive
//! infinite scroll. Both ends live here so the widgets stay free of raw
//! `Closure` plumbing. Listeners registered here live for the page
//! session.

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, IntersectionObserver, IntersectionObserverInit};

/// Listen for a named CustomEvent on `document`.
pub fn on_custom_event(name: &str, handler: impl FnMut(CustomEvent) + 'static) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
        if let Ok(custom) = event.dyn_into::<CustomEvent>() {
            handler(custom);
        }
    }));
    if document
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("failed to register {name} listener");
    }
    closure.forget();
}

/// Pull a string field out of an event's detail object.
pub fn detail_str(event: &CustomEvent, key: &str) -> Option<String> {
    js_sys::Reflect::get(&event.detail(), &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

/// Pull a numeric field out of an event's detail object.
pub fn detail_f64(event: &CustomEvent, key: &str) -> Option<f64> {
    js_sys::Reflect::get(&event.detail(), &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
}

/// Watch an element by id and invoke `on_visible` whenever it enters the
/// viewport (plus `root_margin`). Returns the observer so the caller can
/// keep it alive or disconnect it.
pub fn observe_visibility(
    target_id: &str,
    root_margin: &str,
    on_visible: impl FnMut() + 'static,
) -> Option<IntersectionObserver> {
    let document = web_sys::window().and_then(|window| window.document())?;
    let target = document.get_element_by_id(target_id)?;

    let mut on_visible = on_visible;
    let callback = Closure::<dyn FnMut(js_sys::Array)>::wrap(Box::new(move |entries: js_sys::Array| {
        let visible = entries.iter().any(|entry| {
            entry
                .dyn_into::<web_sys::IntersectionObserverEntry>()
                .map(|entry| entry.is_intersecting())
                .unwrap_or(false)
        });
        if visible {
            on_visible();
        }
    }));

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(&target);
    callback.forget();
    Some(observer)
}

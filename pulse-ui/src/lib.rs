//! Shared presentation layer for the News Pulse dashboard.
//!
//! This crate provides:
//! - `state`: the reactive `DashboardState` provided via Dioxus context
//! - `bus`: the typed selection event channel between widgets
//! - `url_state`: reflecting the selection into `location.search` and back
//! - `js_bridge`: Rust wrappers for the D3.js timeline chart and hover popup
//! - `dom`: CustomEvent and IntersectionObserver interop helpers
//! - `components`: reusable RSX components (selectors, containers, etc.)

pub mod bus;
pub mod components;
pub mod dom;
pub mod js_bridge;
pub mod state;
pub mod url_state;

//! Application state managed via Dioxus context.
//!
//! `DashboardState` bundles the shared signals into a single struct
//! provided by the page controller via `use_context_provider`. Widgets
//! retrieve it with `use_context::<DashboardState>()` instead of reaching
//! into window-level globals.

use dioxus::prelude::*;
use pulse_core::Selection;

use crate::bus::EventBus;

/// Shared state for the dashboard page.
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// The one selection every widget scopes its fetches to.
    pub selection: Signal<Selection>,
    /// User-visible validation message (e.g. an inverted date range).
    pub validation_msg: Signal<Option<String>>,
    /// Typed selection-change channel between widgets.
    pub bus: EventBus,
}

impl DashboardState {
    /// Build the page state from the selection parsed out of the URL.
    pub fn new(initial: Selection) -> Self {
        Self {
            selection: Signal::new(initial),
            validation_msg: Signal::new(None),
            bus: EventBus::new(),
        }
    }
}

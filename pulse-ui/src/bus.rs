//! Typed selection-change channel between widgets.
//!
//! The chart announces clicks here instead of holding references to the
//! list or summary; the controller announces filter edits and history
//! navigation the same way. Events are a tagged union so subscribers
//! match exhaustively rather than duck-typing an event detail object.

use chrono::NaiveDate;
use dioxus::prelude::*;
use pulse_core::GroupBy;

/// What changed the shared selection.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
    /// The user clicked a chart point; week/month buckets arrive already
    /// expanded into their range.
    DateClicked {
        date: NaiveDate,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        group_by: GroupBy,
        query: String,
    },
    /// Search, granularity or date-range edit through the filter bar.
    FilterChanged,
    /// Browser history navigation restored an earlier selection.
    Navigated,
}

/// Page-lifetime publish/subscribe over a sequence-numbered signal.
/// The sequence bumps on every publish, so two identical payloads in a
/// row still notify subscribers; sequence zero means nothing has been
/// published yet.
#[derive(Clone, Copy)]
pub struct EventBus {
    inner: Signal<(u64, Option<SelectionEvent>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Signal::new((0, None)),
        }
    }

    pub fn publish(&mut self, event: SelectionEvent) {
        let seq = self.inner.peek().0 + 1;
        self.inner.set((seq, Some(event)));
    }

    /// Read (and subscribe to, inside a reactive scope) the latest event.
    pub fn latest(&self) -> (u64, Option<SelectionEvent>) {
        self.inner.cloned()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

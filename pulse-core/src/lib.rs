//! Domain logic for the News Pulse dashboard.
//!
//! This crate holds everything the three widgets share that does not touch
//! the browser: the search `Selection` and its URL query-string form, the
//! per-widget `ResultCache`, infinite-scroll `ListPaging`, and the
//! time-bucket math behind the chart's day/week/month granularity. All of
//! it is unit-tested natively; the WASM crates layer DOM and fetch concerns
//! on top.

pub mod bucket;
pub mod cache;
pub mod dates;
pub mod paging;
pub mod selection;

pub use cache::ResultCache;
pub use paging::ListPaging;
pub use selection::{GroupBy, Selection, SelectionError, SelectionPatch};

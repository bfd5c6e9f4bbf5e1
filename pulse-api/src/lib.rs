//! Backend API surface for the News Pulse dashboard.
//!
//! `models` mirrors the JSON the service returns, `endpoints` builds the
//! request parameters for each route from the shared [`pulse_core::Selection`],
//! and `client` wraps fetch with per-widget cancellation and the bounded
//! retry loop the summary endpoint needs while it is still generating.

pub mod client;
pub mod endpoints;
pub mod models;

pub use client::{ApiClient, ApiError, PendingRequest, RetryPolicy};
pub use endpoints::DEFAULT_API_BASE;

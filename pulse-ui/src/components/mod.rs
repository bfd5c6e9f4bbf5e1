//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod date_range_picker;
mod error_display;
mod group_by_selector;
mod loading_spinner;
mod search_bar;
mod section_header;

pub use chart_container::ChartContainer;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use group_by_selector::GroupBySelector;
pub use loading_spinner::LoadingSpinner;
pub use search_bar::SearchBar;
pub use section_header::SectionHeader;

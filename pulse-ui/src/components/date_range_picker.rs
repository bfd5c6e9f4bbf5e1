//! Date range picker with start and end date inputs.
//!
//! The picker is controlled: values come in as props and edits go out
//! through the handlers. When the controller rejects an inverted range
//! the unchanged props re-render the inputs back to the last valid
//! values.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DateRangePickerProps {
    /// Current start date as "YYYY-MM-DD", empty when unset.
    pub start_date: String,
    /// Current end date as "YYYY-MM-DD", empty when unset.
    pub end_date: String,
    pub on_start_change: EventHandler<String>,
    pub on_end_change: EventHandler<String>,
}

/// Date range picker for scoping the dashboard.
#[component]
pub fn DateRangePicker(props: DateRangePickerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    r#type: "date",
                    value: "{props.start_date}",
                    onchange: move |evt| props.on_start_change.call(evt.value()),
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    r#type: "date",
                    value: "{props.end_date}",
                    onchange: move |evt| props.on_end_change.call(evt.value()),
                }
            }
        }
    }
}

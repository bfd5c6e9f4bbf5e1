//! Inline, widget-scoped error component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// When present, renders a retry button next to the message.
    #[props(default)]
    pub on_retry: Option<EventHandler<()>>,
}

/// Displays an error message in a styled box, optionally with a retry
/// affordance. Always inline, never a blocking page-level alert.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; display: flex; justify-content: space-between; align-items: center; gap: 12px;",
            span {
                strong { "Error: " }
                "{props.message}"
            }
            if let Some(on_retry) = props.on_retry {
                button {
                    style: "padding: 4px 12px; border: 1px solid #C62828; border-radius: 4px; background: #fff; color: #C62828; cursor: pointer;",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

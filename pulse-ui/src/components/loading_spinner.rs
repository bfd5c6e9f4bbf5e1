//! Loading indicator component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// Optional status line, e.g. a retry attempt counter.
    #[props(default = String::from("Loading..."))]
    pub message: String,
}

/// Simple loading indicator with an optional status message.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; gap: 8px; padding: 32px; color: #666;",
            span {
                style: "width: 16px; height: 16px; border: 2px solid #ddd; border-top-color: #3B82F6; border-radius: 50%; display: inline-block; animation: spin 0.8s linear infinite;",
            }
            "{props.message}"
        }
    }
}

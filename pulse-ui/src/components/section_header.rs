//! Section header with an optional subtitle.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SectionHeaderProps {
    pub title: String,
    #[props(default)]
    pub subtitle: Option<String>,
}

#[component]
pub fn SectionHeader(props: SectionHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h2 {
                style: "margin: 0; font-size: 18px; color: #111827;",
                "{props.title}"
            }
            if let Some(subtitle) = props.subtitle.as_ref() {
                p {
                    style: "margin: 2px 0 0 0; font-size: 13px; color: #6b7280;",
                    "{subtitle}"
                }
            }
        }
    }
}

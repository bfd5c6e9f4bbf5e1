//! Search input for the dashboard header.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SearchBarProps {
    /// The query currently applied to the page.
    pub value: String,
    pub on_search: EventHandler<String>,
}

/// Search form; submits on Enter or the button.
#[component]
pub fn SearchBar(props: SearchBarProps) -> Element {
    let mut draft = use_signal(|| props.value.clone());

    rsx! {
        form {
            style: "display: flex; gap: 8px;",
            onsubmit: move |evt| {
                evt.prevent_default();
                let query = draft.peek().trim().to_string();
                if !query.is_empty() {
                    props.on_search.call(query);
                }
            },
            input {
                r#type: "search",
                placeholder: "Search news...",
                value: "{draft}",
                style: "padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; min-width: 240px;",
                oninput: move |evt| draft.set(evt.value()),
            }
            button {
                r#type: "submit",
                style: "padding: 8px 16px; border: none; border-radius: 4px; background: #3B82F6; color: #fff; cursor: pointer;",
                "Search"
            }
        }
    }
}

//! Time-bucket granularity selector.

use dioxus::prelude::*;
use pulse_core::GroupBy;

#[derive(Props, Clone, PartialEq)]
pub struct GroupBySelectorProps {
    pub value: GroupBy,
    pub on_change: EventHandler<GroupBy>,
}

/// Dropdown selector for the chart granularity.
#[component]
pub fn GroupBySelector(props: GroupBySelectorProps) -> Element {
    let choices = [GroupBy::Day, GroupBy::Week, GroupBy::Month];

    rsx! {
        label {
            style: "font-weight: bold; display: flex; gap: 8px; align-items: center;",
            "Group by: "
            select {
                onchange: move |evt| props.on_change.call(GroupBy::parse(&evt.value())),
                for choice in choices {
                    option {
                        value: "{choice}",
                        selected: props.value == choice,
                        "{choice.label()}"
                    }
                }
            }
        }
    }
}

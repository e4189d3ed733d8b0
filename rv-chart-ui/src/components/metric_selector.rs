//! Dropdown selector for the metric.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MetricSelectorProps {
    /// Called with the chosen metric label
    pub on_select: EventHandler<String>,
}

/// Metric dropdown. Options and the current value come from AppState.
#[component]
pub fn MetricSelector(props: MetricSelectorProps) -> Element {
    let state = use_context::<AppState>();
    let metrics = state.metrics.read().clone();
    let selected = (state.metric)();

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "metricSelector",
                style: "font-weight: bold; margin-right: 8px;",
                "Metric: "
            }
            select {
                id: "metricSelector",
                onchange: move |evt: Event<FormData>| props.on_select.call(evt.value()),
                for label in metrics.iter() {
                    option {
                        value: "{label}",
                        selected: *label == selected,
                        "{label}"
                    }
                }
            }
        }
    }
}

//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[props(default = "Error".to_string())]
    pub heading: String,
}

/// Dashboard-level error box. Chart load failures are drawn inside the chart
/// container by the D3 scripts instead.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "{props.heading}: " }
            "{props.message}"
        }
    }
}

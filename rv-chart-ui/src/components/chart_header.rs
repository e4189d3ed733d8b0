//! Chart header component with title and the metric currently shown.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Selected metric, shown under the title
    #[props(default = String::new())]
    pub metric: String,
    /// Continent filter, omitted when it is "all"
    #[props(default = String::new())]
    pub continent: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let scope = if props.continent.is_empty() || props.continent == rv_core::ALL_CONTINENTS {
        "All continents".to_string()
    } else {
        props.continent.clone()
    };

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.metric.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.metric} · {scope}"
                }
            }
        }
    }
}

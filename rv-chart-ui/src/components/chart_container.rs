//! Host element for one dashboard chart.

use dioxus::prelude::*;
use rv_core::ChartKind;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    pub kind: ChartKind,
    /// Whether the chart's datasets are still in flight
    #[props(default = false)]
    pub loading: bool,
    /// Reserved height so the page does not jump when the chart lands
    #[props(default = 500)]
    pub min_height: u32,
}

/// The element D3 draws into, keyed by the chart's container id. The map
/// scales its fixed view box with CSS, the other charts take the measured
/// width on resize.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let kind = props.kind;
    let overflow = if kind.responsive() { "hidden" } else { "visible" };
    let style = format!(
        "min-height: {}px; margin: 0; position: relative; width: 100%; overflow-x: {overflow};",
        props.min_height
    );

    rsx! {
        figure {
            style: "{style}",
            "aria-label": "{kind.title()}",
            "data-chart": "{kind.id()}",
            if props.loading {
                figcaption {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading {kind.title().to_lowercase()}..."
                }
            }
            div {
                id: "{kind.container_id()}",
                style: "width: 100%; position: relative;",
            }
        }
    }
}

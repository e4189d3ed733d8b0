//! Dropdown selector for the continent filter.

use crate::state::AppState;
use dioxus::prelude::*;
use rv_core::ALL_CONTINENTS;

#[derive(Props, Clone, PartialEq)]
pub struct ContinentSelectorProps {
    /// Called with `"all"` or a continent name
    pub on_select: EventHandler<String>,
}

#[component]
pub fn ContinentSelector(props: ContinentSelectorProps) -> Element {
    let state = use_context::<AppState>();
    let continents = state.continents.read().clone();
    let selected = (state.continent)();

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "continentSelector",
                style: "font-weight: bold; margin-right: 8px;",
                "Continent: "
            }
            select {
                id: "continentSelector",
                onchange: move |evt: Event<FormData>| props.on_select.call(evt.value()),
                option {
                    value: ALL_CONTINENTS,
                    selected: selected == ALL_CONTINENTS,
                    "All Continents"
                }
                for continent in continents.iter() {
                    option {
                        value: "{continent}",
                        selected: *continent == selected,
                        "{continent}"
                    }
                }
            }
        }
    }
}

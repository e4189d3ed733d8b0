//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart functions live in `assets/js/*.js`, are embedded at compile
//! time and evaluated as globals once D3 has loaded. Each render call polls
//! until D3, the scripts and the container element are all available.

use rv_core::Scene;

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static LEGEND_JS: &str = include_str!("../assets/js/legend.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static SCATTER_PLOT_JS: &str = include_str!("../assets/js/scatter-plot.js");
static CHOROPLETH_MAP_JS: &str = include_str!("../assets/js/choropleth-map.js");
static RANKINGS_CHART_JS: &str = include_str!("../assets/js/rankings-chart.js");

/// Global functions promoted to `window` once the scripts are evaluated.
const EXPORTED: [&str; 9] = [
    "initTooltip",
    "showTooltip",
    "hideTooltip",
    "showChartError",
    "renderLegend",
    "renderBarChart",
    "renderScatterPlot",
    "renderChoroplethMap",
    "renderRankingsChart",
];

/// D3 build loaded by [`init_charts`] when the page does not ship one.
pub const D3_URL: &str = "https://d3js.org/d3.v7.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[RV] JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a string as a JS literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop, adding a D3
/// script tag first if the page has none. Call once at app startup.
///
/// The scripts are stored on `window` and evaluated at global scope by
/// indirect eval from the polling callback, then each function is promoted to
/// `window.*` explicitly.
pub fn init_charts() {
    let all_js = [
        TOOLTIP_JS,
        LEGEND_JS,
        BAR_CHART_JS,
        SCATTER_PLOT_JS,
        CHOROPLETH_MAP_JS,
        RANKINGS_CHART_JS,
    ]
    .join("\n");
    call_js(&format!("window.__rvChartScripts = {};", js_string(&all_js)));
    call_js(&format!(
        r#"
        if (typeof d3 === 'undefined' && !document.getElementById('rv-d3')) {{
            var s = document.createElement('script');
            s.id = 'rv-d3';
            s.src = {};
            document.head.appendChild(s);
        }}
        "#,
        js_string(D3_URL)
    ));

    let promote: String = EXPORTED
        .iter()
        .map(|name| format!("if (typeof {name} !== 'undefined') window.{name} = {name};\n"))
        .collect();
    call_js(&format!(
        r#"
        (function() {{
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__rvChartScripts);
                    delete window.__rvChartScripts;
                    {promote}
                    window.initTooltip();
                    window.__rvChartsReady = true;
                    console.log('[RV] charts initialized');
                }}
            }}, 100);
        }})();
        "#
    ));
}

/// Call `window.{function}(container_id, payload)` once everything is ready.
fn call_when_ready(function: &str, container_id: &str, payload: &str) {
    let container = js_string(container_id);
    let payload = js_string(payload);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__rvChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({container}, {payload});
                    }} catch(e) {{ console.error('[RV] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// D3 entry point for a scene.
pub fn render_function(scene: &Scene) -> &'static str {
    match scene {
        Scene::Bar(_) => "renderBarChart",
        Scene::Scatter(_) => "renderScatterPlot",
        Scene::Map(_) => "renderChoroplethMap",
        Scene::Rankings(_) => "renderRankingsChart",
    }
}

/// Hand a prepared scene to its D3 renderer.
pub fn render_scene(container_id: &str, scene: &Scene) {
    call_when_ready(render_function(scene), container_id, &scene.to_json());
}

/// Replace the chart with an inline error message.
pub fn show_chart_error(container_id: &str, message: &str) {
    call_when_ready("showChartError", container_id, message);
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById({}); if (el) el.innerHTML = '';",
        js_string(container_id)
    ));
}

/// Current width of a container element, if it is in the document.
pub fn container_width(container_id: &str) -> Option<f64> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(container_id)?;
    let width = element.get_bounding_client_rect().width();
    (width > 0.0).then_some(width)
}

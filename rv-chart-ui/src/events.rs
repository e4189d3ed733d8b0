//! Browser callbacks into Rust: bar-chart clicks and window resize.
//!
//! Closures are leaked with `forget()`; they live as long as the page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

fn set_window_callback(name: &str, callback: &JsValue) {
    let Some(window) = web_sys::window() else {
        log::warn!("[RV] no window, cannot install {}", name);
        return;
    };
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(name), callback) {
        log::error!("[RV] failed to install {}: {:?}", name, e);
    }
}

/// `window.__rvOnBarClick(name)`, called by the bar chart when an aggregate
/// bar is clicked.
pub fn on_bar_click(mut callback: impl FnMut(String) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |name: JsValue| {
        if let Some(name) = name.as_string() {
            callback(name);
        }
    }));
    set_window_callback("__rvOnBarClick", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// `window.__rvOnBarBack()`, called by the bar chart's back button.
pub fn on_bar_back(mut callback: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || callback()));
    set_window_callback("__rvOnBarBack", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_resize(mut callback: impl FnMut() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || callback()));
    if let Err(e) =
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
    {
        log::error!("[RV] failed to install resize handler: {:?}", e);
    }
    closure.forget();
}

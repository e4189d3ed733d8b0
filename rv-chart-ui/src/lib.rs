//! Dioxus components and the D3.js bridge for the recycling dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart functions via `js_sys::eval()`
//! - `adapter`: `D3Adapter`, the core's `RenderAdapter` for the browser
//! - `fetch`: `HttpFetcher`, the core's `Fetch` over the browser fetch API
//! - `events`: bar-click, back and resize callbacks into Rust
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: selectors, chart containers, headers

pub mod adapter;
pub mod components;
pub mod events;
pub mod fetch;
pub mod js_bridge;
pub mod state;

pub use adapter::D3Adapter;
pub use fetch::HttpFetcher;

/// The dashboard as wired in the browser.
pub type WebDashboard = rv_core::Dashboard<D3Adapter>;

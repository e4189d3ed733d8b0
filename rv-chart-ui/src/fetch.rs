//! Browser `fetch` for the core's data loader.

use rv_core::loader::Fetch;
use rv_core::{Result, VizError};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Fetches static JSON files relative to `base`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    base: String,
}

impl HttpFetcher {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, url: &str) -> String {
        if self.base.is_empty() || url.contains("://") || url.starts_with('/') {
            url.to_string()
        } else {
            format!("{}/{}", self.base, url)
        }
    }
}

fn js_reason(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(&value)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| "unknown JS error".to_string())
}

impl Fetch for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let url = self.resolve(url);
        let fail = |reason: String| VizError::Fetch {
            url: url.clone(),
            reason,
        };

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::SameOrigin);
        let request = Request::new_with_str_and_init(&url, &init).map_err(|e| fail(js_reason(e)))?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(|e| fail(js_reason(e)))?;

        let window = web_sys::window().ok_or_else(|| fail("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| fail(js_reason(e)))?;
        let response: Response = response.dyn_into().map_err(|e| fail(js_reason(e)))?;
        if !response.ok() {
            return Err(fail(format!("{} {}", response.status(), response.status_text())));
        }

        let text = JsFuture::from(response.text().map_err(|e| fail(js_reason(e)))?)
            .await
            .map_err(|e| fail(js_reason(e)))?
            .as_string()
            .ok_or_else(|| fail("response body is not text".to_string()))?;
        log::debug!("[RV] fetched {} ({} bytes)", url, text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

//! Dataset loading.
//!
//! A visualization asks for one or more static JSON files and gets one parsed
//! payload per URL, in input order. All requests run concurrently and the
//! first failure fails the whole load. Nothing is cached across loaders.

use crate::error::{Result, VizError};
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::HashMap;

/// Source of JSON payloads. The web front-end implements this over the
/// browser fetch API; tests and offline tools use [`FixtureFetcher`].
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Loads every dataset a visualization needs before its first render.
#[derive(Debug, Clone)]
pub struct DataLoader<F> {
    fetcher: F,
}

impl<F: Fetch> DataLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse every URL. Payloads come back in `urls` order.
    pub async fn load(&self, urls: &[String]) -> Result<Vec<Value>> {
        log::debug!("loader: fetching {} dataset(s)", urls.len());
        let payloads = try_join_all(urls.iter().map(|url| self.fetcher.fetch_json(url))).await?;
        log::info!("loader: loaded {}", urls.join(", "));
        Ok(payloads)
    }
}

/// In-memory payloads keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    payloads: HashMap<String, Value>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, payload: Value) -> Self {
        self.payloads.insert(url.to_string(), payload);
        self
    }

    /// Register a payload from raw JSON text.
    pub fn with_text(self, url: &str, text: &str) -> Result<Self> {
        let payload: Value = serde_json::from_str(text)?;
        Ok(self.with(url, payload))
    }
}

impl Fetch for FixtureFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        self.payloads.get(url).cloned().ok_or_else(|| VizError::Fetch {
            url: url.to_string(),
            reason: "404 Not Found".to_string(),
        })
    }
}

impl<F: Fetch> Fetch for &F {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        (**self).fetch_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn payloads_keep_input_order() {
        let loader = DataLoader::new(
            FixtureFetcher::new()
                .with("a.json", json!([1]))
                .with("b.json", json!([2])),
        );
        let payloads = block_on(loader.load(&urls(&["b.json", "a.json"]))).unwrap();
        assert_eq!(payloads, vec![json!([2]), json!([1])]);
    }

    #[test]
    fn one_failure_fails_the_load() {
        let loader = DataLoader::new(FixtureFetcher::new().with("a.json", json!([])));
        let err = block_on(loader.load(&urls(&["a.json", "missing.json"]))).unwrap_err();
        assert!(matches!(err, VizError::Fetch { ref url, .. } if url == "missing.json"));
    }

    #[test]
    fn empty_request_loads_nothing() {
        let loader = DataLoader::new(FixtureFetcher::new());
        assert!(block_on(loader.load(&[])).unwrap().is_empty());
    }

    #[test]
    fn fixture_from_text() {
        assert!(FixtureFetcher::new().with_text("x", "{not json").is_err());
        let fetcher = FixtureFetcher::new().with_text("x", "[1, 2]").unwrap();
        assert_eq!(block_on(fetcher.fetch_json("x")).unwrap(), json!([1, 2]));
    }
}

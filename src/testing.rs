//! Scripted transport for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::config::FmpConfig;
use super::core::Fmp;
use super::error::{FmpError, Result};
use super::traits::JsonFetcher;

pub(crate) const TEST_BASE_URL: &str = "http://fmp.test";

enum Reply {
    Json(Value),
    Status(u16),
}

/// Answers requests from a route table and records every route it was asked for.
///
/// Routes are the URL without the base and without the trailing `apikey`, e.g.
/// `/profile?symbol=AAPL` or `/stock-list`. Unscripted routes answer 404.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_json(mut self, route: &str, body: Value) -> Self {
        self.replies.insert(route.to_string(), Reply::Json(body));
        self
    }

    pub(crate) fn with_status(mut self, route: &str, status: u16) -> Self {
        self.replies.insert(route.to_string(), Reply::Status(status));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests whose path (before `?`) equals `path`.
    pub(crate) fn calls_to(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|route| route.split('?').next() == Some(path))
            .count()
    }
}

fn route_of(url: &str) -> String {
    let rest = url.strip_prefix(TEST_BASE_URL).unwrap_or(url);
    match rest.rsplit_once("apikey=") {
        Some((head, _)) => head.trim_end_matches(['&', '?']).to_string(),
        None => rest.to_string(),
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let route = route_of(url);
        self.calls.lock().unwrap().push(route.clone());
        match self.replies.get(&route) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(FmpError::Transport {
                status: *status,
                body: format!("scripted failure for {}", route),
            }),
            None => Err(FmpError::Transport {
                status: 404,
                body: format!("no route for {}", route),
            }),
        }
    }
}

pub(crate) fn scripted_client(fetcher: &Arc<ScriptedFetcher>) -> Fmp {
    let config = FmpConfig::new("test-key").with_base_url(TEST_BASE_URL);
    Fmp::with_fetcher(config, fetcher.clone()).unwrap()
}

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::config::FmpConfig;
use super::error::{FmpError, Result};
use super::parsing::fields::{is_truthy, text_of};
use super::traits::JsonFetcher;

/// Keys whose presence marks a decoded object as an application-level error.
const ERROR_KEYS: [&str; 3] = ["Error Message", "error", "message"];

/// Upstream endpoints used by the client, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Profile,
    SearchName,
    Search,
    SearchSymbol,
    StockList,
    HistoricalPriceLight,
    BeneficialOwnership,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Profile => "profile",
            Endpoint::SearchName => "search-name",
            Endpoint::Search => "search",
            Endpoint::SearchSymbol => "search-symbol",
            Endpoint::StockList => "stock-list",
            Endpoint::HistoricalPriceLight => "historical-price-eod/light",
            Endpoint::BeneficialOwnership => "acquisition-of-beneficial-ownership",
        }
    }
}

/// Client for the Financial Modeling Prep "stable" API.
///
/// `Fmp` owns the transport and the credentials and exposes the company lookup
/// operations through [`CompanyOperations`](crate::CompanyOperations). Every call is
/// resolved from scratch: nothing is cached between requests and no request is retried.
/// "Retrying" during symbol resolution means moving on to a structurally different
/// strategy or endpoint.
///
/// # Examples
///
/// ```rust
/// # use fmpkit::Fmp;
/// let fmp = Fmp::new("my-api-key")?;
/// # Ok::<(), fmpkit::FmpError>(())
/// ```
///
/// Reading the key from `FMP_API_KEY`:
///
/// ```ignore
/// use fmpkit::Fmp;
/// let fmp = Fmp::from_env()?;
/// ```
#[derive(Clone)]
pub struct Fmp {
    /// Transport used for every request
    pub(crate) fetcher: Arc<dyn JsonFetcher>,

    /// Base URL the endpoint paths are appended to
    pub(crate) base_url: String,

    /// API key appended to each request as `apikey`
    pub(crate) api_key: String,
}

impl fmt::Debug for Fmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fmp")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Fmp {
    /// Creates a client for the public API with the default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::ConfigError` if the key is blank or the HTTP client
    /// cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(FmpConfig::new(api_key))
    }

    /// Creates a client using the key stored in `FMP_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(FmpConfig::from_env()?)
    }

    /// Creates a client with custom configuration settings.
    ///
    /// Use this to point the client at another host (tests, proxies) or to set a
    /// request timeout.
    pub fn with_config(config: FmpConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.timeout)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a client driven by a custom [`JsonFetcher`] transport.
    pub fn with_fetcher(config: FmpConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self> {
        config.validate()?;
        Ok(Fmp {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Returns the base URL the endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and decodes `url`, rejecting bodies that encode an API error.
    ///
    /// # Errors
    ///
    /// * `FmpError::Transport` - Non-success HTTP status
    /// * `FmpError::Api` - The body is an object carrying `"Error Message"`, `"error"`
    ///   or `"message"`
    /// * `FmpError::RequestError` / `FmpError::JsonError` - Network or decode failure
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        let value = self.fetcher.fetch_json(url).await?;
        check_api_error(value)
    }

    /// Builds the URL for `endpoint` and fetches it.
    pub(crate) async fn get_json(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint, params)?;
        tracing::debug!(endpoint = endpoint.path(), ?params, "requesting");
        self.fetch_json(&url).await
    }

    /// Builds an endpoint URL. The API key is always the last query parameter.
    pub(crate) fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<String> {
        let mut query = params.to_vec();
        query.push(("apikey", self.api_key.as_str()));
        let query = serde_urlencoded::to_string(&query)?;
        Ok(format!("{}/{}?{}", self.base_url, endpoint.path(), query))
    }
}

/// Rejects decoded objects that describe an application error instead of data.
pub(crate) fn check_api_error(value: Value) -> Result<Value> {
    if let Value::Object(map) = &value {
        if ERROR_KEYS.iter().any(|key| map.contains_key(*key)) {
            let message = ERROR_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|v| is_truthy(v))
                .and_then(text_of)
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(FmpError::Api { message });
        }
    }
    Ok(value)
}

/// Default [`JsonFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("fmpkit/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FmpError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        // Request URLs carry the API key, keep them out of error text.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FmpError::RequestError(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(FmpError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FmpError::RequestError(e.without_url()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

use std::time::Duration;

use super::error::{FmpError, Result};

/// Environment variable holding the Financial Modeling Prep API key.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// Base URL of the Financial Modeling Prep "stable" API.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Configuration for the Fmp client
#[derive(Debug, Clone)]
pub struct FmpConfig {
    /// API key sent as the `apikey` query parameter on every request
    pub api_key: String,
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// HTTP request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

impl FmpConfig {
    /// Creates a configuration for the public API with the given key.
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use fmpkit::{Fmp, FmpConfig};
    /// use std::time::Duration;
    ///
    /// let mut config = FmpConfig::new("demo-key");
    /// config.timeout = Some(Duration::from_secs(20));
    /// let fmp = Fmp::with_config(config)?;
    /// # Ok::<(), fmpkit::FmpError>(())
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Reads the API key from `FMP_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::ConfigError` when the variable is unset. A blank value is
    /// rejected when the client is built.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            FmpError::ConfigError(format!("{} environment variable is not set", API_KEY_ENV))
        })?;
        Ok(Self::new(api_key))
    }

    /// Points the configuration at a different host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the invariants the client relies on.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(FmpError::ConfigError(format!(
                "{} environment variable is not set",
                API_KEY_ENV
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(FmpError::ConfigError(format!(
                "Invalid base URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

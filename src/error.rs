use thiserror::Error;

/// Longest excerpt of an upstream failure carried into a resolution error.
pub(crate) const ERROR_EXCERPT_CHARS: usize = 200;

/// A single failed attempt inside the symbol resolution cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    /// Name of the strategy that failed, e.g. `"search-name (query)"`.
    pub strategy: &'static str,
    /// Display text of the error the strategy raised.
    pub message: String,
}

#[derive(Error, Debug)]
pub enum FmpError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API Error {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("{message}")]
    Api { message: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Query encoding error: {0}")]
    UrlEncoding(#[from] serde_urlencoded::ser::Error),

    #[error(
        "Unable to find company \"{term}\".\n\nThe search functionality may not be available in your API plan, or the company may not be in the database.\n\nPlease try:\n• Using the stock symbol instead (e.g., \"MSFT\" for Microsoft, \"AAPL\" for Apple)\n• Checking the spelling of the company name\n• Using a different company name or symbol{}",
        technical_details(.failures)
    )]
    Resolution {
        term: String,
        failures: Vec<StrategyFailure>,
    },

    #[error("Supplementary data for {symbol} unavailable: {cause}")]
    SupplementaryData {
        symbol: String,
        cause: Box<FmpError>,
    },

    #[error("Failed to fetch company data: {0}")]
    CompanyData(Box<FmpError>),
}

impl FmpError {
    /// Message of the last strategy failure recorded during resolution, if any.
    pub fn last_strategy_error(&self) -> Option<&str> {
        match self {
            FmpError::Resolution { failures, .. } => failures.last().map(|f| f.message.as_str()),
            FmpError::CompanyData(inner) => inner.last_strategy_error(),
            _ => None,
        }
    }
}

fn technical_details(failures: &[StrategyFailure]) -> String {
    match failures.last() {
        Some(failure) => format!(
            "\n\nTechnical details: {}",
            failure
                .message
                .chars()
                .take(ERROR_EXCERPT_CHARS)
                .collect::<String>()
        ),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, FmpError>;

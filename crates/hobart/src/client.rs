//! HTTP client for the Financial Modeling Prep API.

use std::fmt;

use serde::Deserialize;

use crate::config::FmpConfig;
use crate::error::{FmpError, Result};
use crate::statement::{RawRecord, StatementKind};

/// Fixed periodicity for statement requests.
const ANNUAL_PERIOD: &str = "annual";

/// One entry of the provider's tradable-symbol list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolListing {
    /// Ticker symbol
    pub symbol: String,
    /// Company name, when the provider has one
    #[serde(default)]
    pub name: Option<String>,
    /// Short exchange code (e.g. "NASDAQ")
    #[serde(default)]
    pub exchange_short_name: Option<String>,
}

/// Client for the FMP REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FmpClient {
    client: reqwest::Client,
    config: FmpConfig,
}

impl FmpClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    /// Returns `FmpError::Network` if the HTTP client cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use hobart::{FmpClient, FmpConfig};
    ///
    /// # fn example() -> hobart::Result<()> {
    /// let client = FmpClient::new(FmpConfig::new("your_api_key"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: FmpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FmpError::Network)?;

        Ok(Self { client, config })
    }

    /// Create a client configured from the `FMP_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    /// Returns `FmpError::Config` if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(FmpConfig::from_env()?)
    }

    /// Build a URL with the API key appended.
    fn url(&self, endpoint: &str) -> String {
        let base = self.config.base_url();
        if endpoint.contains('?') {
            format!("{base}/{endpoint}&apikey={}", self.config.api_key())
        } else {
            format!("{base}/{endpoint}?apikey={}", self.config.api_key())
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!("FMP request: {}", endpoint);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // FMP signals some failures inside a success-status body
        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        serde_json::from_str(&text).map_err(|e| FmpError::Schema(format!("{e}: {text}")))
    }

    /// Fetch the provider's full tradable-symbol list.
    ///
    /// # Errors
    /// Returns `FmpError::Schema` if the response is not a list of symbol
    /// entries; transport failures map to `FmpError::Network` or
    /// `FmpError::Api`.
    pub async fn symbol_list(&self) -> Result<Vec<SymbolListing>> {
        self.get("stock/list").await
    }

    /// Check that a ticker exists in the provider's symbol list.
    ///
    /// The comparison is an exact match against the listed symbols.
    ///
    /// # Arguments
    /// * `ticker` - Stock ticker symbol (e.g. "AAPL")
    ///
    /// # Returns
    /// The ticker, unchanged, when it is listed.
    ///
    /// # Errors
    /// Returns `FmpError::InvalidTicker` if the ticker is empty or not
    /// listed; transport and decode failures propagate unchanged.
    ///
    /// # Example
    /// ```no_run
    /// use hobart::{FmpClient, FmpConfig};
    ///
    /// # async fn example() -> hobart::Result<()> {
    /// let client = FmpClient::new(FmpConfig::new("your_api_key"))?;
    /// let ticker = client.validate_ticker("AAPL").await?;
    /// println!("{ticker} is listed");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_ticker(&self, ticker: &str) -> Result<String> {
        if ticker.is_empty() {
            return Err(FmpError::InvalidTicker("Empty ticker".to_string()));
        }

        let listings = self.symbol_list().await?;
        tracing::debug!("symbol list has {} entries", listings.len());

        if listings.iter().any(|entry| entry.symbol == ticker) {
            Ok(ticker.to_string())
        } else {
            Err(FmpError::InvalidTicker(ticker.to_string()))
        }
    }

    /// Fetch one kind of annual statement as raw records.
    ///
    /// Records arrive in provider order, most recent period first. Tabular
    /// access goes through
    /// [`StatementTable::from_records`](crate::StatementTable::from_records).
    ///
    /// # Arguments
    /// * `ticker` - Stock ticker symbol (e.g. "AAPL")
    /// * `kind` - Statement kind to request
    ///
    /// # Errors
    /// Returns `FmpError::InvalidTicker` for an empty ticker and
    /// `FmpError::Schema` when the body is not a JSON array of records;
    /// transport failures map to `FmpError::Network` or `FmpError::Api`.
    pub async fn statement_records(
        &self,
        ticker: &str,
        kind: StatementKind,
    ) -> Result<Vec<RawRecord>> {
        if ticker.is_empty() {
            return Err(FmpError::InvalidTicker("Empty ticker".to_string()));
        }

        let endpoint = format!("{}/{ticker}?period={ANNUAL_PERIOD}", kind.endpoint());
        self.get(&endpoint).await
    }
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

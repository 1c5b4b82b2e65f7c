//! Per-ticker statement sessions.

use crate::client::FmpClient;
use crate::error::{FmpError, Result};
use crate::statement::StatementKind;
use crate::table::{StatementTable, TransposedTable};

/// Financial statements for one validated ticker.
///
/// A session stores the last fetched table per statement kind and
/// overwrites it on re-fetch; a failed fetch leaves the stored table
/// untouched. Fetching takes `&mut self`, so access is serialized per
/// session; clone the [`FmpClient`] and open more sessions for
/// concurrent tickers.
#[derive(Debug)]
pub struct CompanyFinancials {
    client: FmpClient,
    ticker: String,
    balance_sheet: Option<StatementTable>,
    income_statement: Option<StatementTable>,
    cash_flow: Option<StatementTable>,
}

impl CompanyFinancials {
    /// Open a session after validating the ticker against the provider's
    /// symbol list.
    ///
    /// # Arguments
    /// * `client` - Client the session fetches through
    /// * `ticker` - Stock ticker symbol (e.g. "AAPL")
    ///
    /// # Errors
    /// Returns `FmpError::InvalidTicker` for empty or unlisted tickers;
    /// transport and decode failures propagate unchanged.
    ///
    /// # Example
    /// ```no_run
    /// use hobart::{CompanyFinancials, FmpClient, FmpConfig, StatementKind};
    ///
    /// # async fn example() -> hobart::Result<()> {
    /// let client = FmpClient::new(FmpConfig::new("your_api_key"))?;
    /// let mut company = CompanyFinancials::open(&client, "AAPL").await?;
    ///
    /// let table = company.fetch(StatementKind::IncomeStatement).await?;
    /// println!("{} annual periods", table.height());
    ///
    /// let pivot = company.transposed(StatementKind::IncomeStatement)?;
    /// println!("years: {:?}", pivot.labels());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn open(client: &FmpClient, ticker: &str) -> Result<Self> {
        let ticker = client.validate_ticker(ticker).await?;
        Ok(Self {
            client: client.clone(),
            ticker,
            balance_sheet: None,
            income_statement: None,
            cash_flow: None,
        })
    }

    /// The validated ticker this session is bound to.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Fetch one statement kind and store its normalized table,
    /// overwriting any previous table for that kind.
    ///
    /// # Errors
    /// Transport, decode, and normalization failures propagate unchanged
    /// and leave the previously stored table in place.
    pub async fn fetch(&mut self, kind: StatementKind) -> Result<&StatementTable> {
        let records = self.client.statement_records(&self.ticker, kind).await?;
        tracing::debug!("{}: {} {} records", self.ticker, records.len(), kind);

        let table = StatementTable::from_records(records)?;
        Ok(self.slot_mut(kind).insert(table))
    }

    /// Fetch all statement kinds sequentially.
    ///
    /// Stops at the first failure; kinds fetched before the failure keep
    /// their stored tables.
    ///
    /// # Errors
    /// Propagates the first fetch failure unchanged.
    pub async fn fetch_all(&mut self) -> Result<()> {
        for kind in StatementKind::ALL {
            self.fetch(kind).await?;
        }
        Ok(())
    }

    /// The last table fetched for `kind`, if any.
    #[must_use]
    pub const fn statement(&self, kind: StatementKind) -> Option<&StatementTable> {
        self.slot(kind).as_ref()
    }

    /// Transpose the last table fetched for `kind`.
    ///
    /// # Errors
    /// Returns `FmpError::NotFetched` when `kind` has not been fetched on
    /// this session, and `FmpError::Schema` when the stored table has no
    /// usable `calendarYear`.
    pub fn transposed(&self, kind: StatementKind) -> Result<TransposedTable> {
        self.slot(kind)
            .as_ref()
            .ok_or_else(|| FmpError::NotFetched {
                ticker: self.ticker.clone(),
                kind,
            })?
            .transposed()
    }

    const fn slot(&self, kind: StatementKind) -> &Option<StatementTable> {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    fn slot_mut(&mut self, kind: StatementKind) -> &mut Option<StatementTable> {
        match kind {
            StatementKind::BalanceSheet => &mut self.balance_sheet,
            StatementKind::IncomeStatement => &mut self.income_statement,
            StatementKind::CashFlow => &mut self.cash_flow,
        }
    }
}

//! Statement kinds and raw provider records.

use std::fmt;

/// One reporting period's data as returned by the provider.
///
/// Field sets vary by statement kind but always carry `date` and
/// `calendarYear`.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// The statement kinds served by the FMP statement endpoints.
///
/// Only annual periodicity is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Balance sheet statement
    BalanceSheet,
    /// Income statement
    IncomeStatement,
    /// Cash flow statement
    CashFlow,
}

impl StatementKind {
    /// All statement kinds, in fetch order.
    pub const ALL: [Self; 3] = [Self::BalanceSheet, Self::IncomeStatement, Self::CashFlow];

    /// Endpoint path segment for this kind.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance-sheet-statement",
            Self::IncomeStatement => "income-statement",
            Self::CashFlow => "cash-flow-statement",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BalanceSheet => "balance sheet statement",
            Self::IncomeStatement => "income statement",
            Self::CashFlow => "cash flow statement",
        };
        f.write_str(name)
    }
}

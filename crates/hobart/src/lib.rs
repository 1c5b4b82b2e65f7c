#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod financials;
pub mod statement;
pub mod table;

pub use client::{FmpClient, SymbolListing};
pub use config::FmpConfig;
pub use error::{FmpError, Result};
pub use financials::CompanyFinancials;
pub use statement::{RawRecord, StatementKind};
pub use table::{StatementTable, TransposedTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

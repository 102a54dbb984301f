//! Expense tracker is a personal finance tool for recording income and
//! expenses and browsing them over a date range.
//!
//! This library provides the transaction table engine (filtering, sorting,
//! pagination, facets and CSV export), the statistics shown next to the table
//! and the data access layer that loads transaction history.

#![warn(missing_docs)]

use time::Date;

mod category;
mod currency;
mod date_range;
mod history;
mod settings;
mod stats;
mod table;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use category::{Category, CategoryIcon, CategoryName};
pub use currency::{
    CURRENCIES, Currency, DEFAULT_CURRENCY, currency_symbol, find_currency, format_amount,
};
pub use date_range::{DateRange, MAX_DATE_RANGE_DAYS};
pub use history::{HistoryCache, HistoryRequest, HistorySource, JsonFileSource};
pub use settings::UserSettings;
pub use stats::{
    CategoryTotal, HistoryPoint, Overview, Period, Timeframe, category_breakdown, history_data,
    history_periods, overview,
};
pub use table::{
    COLUMNS, Column, DEFAULT_PAGE_SIZE, EXPORT_HEADERS, FacetOption, Facets, FilterState,
    MAX_PAGE_LINKS, PageLink, PageState, SortDirection, SortKey, SortState, TableState, TableView,
    TransactionTable, build_facets, derive_rows, export_csv, filter_rows, find_column, page_count,
    page_links, paginate, render, sort_rows, write_csv,
};
pub use transaction::{
    DerivedRow, Timestamp, TransactionBuilder, TransactionRecord, TransactionType,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was negative, zero when a positive amount is
    /// required, or not a finite number.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A category icon must be exactly one glyph, e.g. an emoji.
    #[error("\"{0}\" is not a single glyph")]
    InvalidCategoryIcon(String),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A transaction timestamp could not be parsed as an RFC 3339 date-time.
    #[error("could not parse timestamp \"{0}\"")]
    InvalidTimestamp(String),

    /// The end of a date range was before its start.
    #[error("the date range {from} to {to} ends before it starts")]
    InvalidDateRange {
        /// The first day of the range.
        from: Date,
        /// The last day of the range.
        to: Date,
    },

    /// The date range spans more days than allowed.
    #[error(
        "date range too big, it spans {0} days but at most {max} are allowed",
        max = MAX_DATE_RANGE_DAYS
    )]
    DateRangeTooLarge(i64),

    /// The currency code is not one of the supported [CURRENCIES].
    #[error("unsupported currency \"{0}\"")]
    UnknownCurrency(String),

    /// A file could not be read or written.
    ///
    /// The error string should only be logged for debugging.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// JSON data could not be parsed.
    #[error("could not parse JSON: {0}")]
    Json(String),

    /// A CSV document could not be written.
    #[error("could not write CSV: {0}")]
    Csv(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unexpected I/O error occurred: {value}");
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("an unexpected CSV error occurred: {value}");
        Error::Csv(value.to_string())
    }
}

//! Transaction records and the rows derived from them for display.
//!
//! This module contains:
//! - The `TransactionRecord` model and `TransactionBuilder` for creating records
//! - The UTC `Timestamp` that keeps the text it was parsed from
//! - The `DerivedRow` that pairs a record with its formatted amount

mod record;
mod row;

pub use record::{Timestamp, TransactionBuilder, TransactionRecord, TransactionType};
pub use row::DerivedRow;

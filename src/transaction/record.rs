//! Defines the transaction record model and its UTC timestamp.

use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{Error, category::Category};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// Both transaction types, income first.
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// The value used on the wire and in filters, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The capitalised name shown in filter controls.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in time normalised to UTC.
///
/// The text the timestamp was created from is kept so that it can be written
/// back out unchanged, e.g. when exporting transactions. Comparisons only look
/// at the instant.
#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: OffsetDateTime,
    raw: String,
}

impl Timestamp {
    /// Parse an RFC 3339 date-time such as `2025-01-15T09:30:00.000Z`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimestamp] if `text` is not a valid RFC 3339 date-time.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let instant = OffsetDateTime::parse(text, &Rfc3339)
            .map_err(|_| Error::InvalidTimestamp(text.to_owned()))?;

        Ok(Self {
            instant: instant.to_offset(UtcOffset::UTC),
            raw: text.to_owned(),
        })
    }

    /// Create a timestamp from a date-time in any offset.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimestamp] if the date-time cannot be written as
    /// RFC 3339, e.g. because the year has more than four digits.
    pub fn from_datetime(date_time: OffsetDateTime) -> Result<Self, Error> {
        let instant = date_time.to_offset(UtcOffset::UTC);
        let raw = instant
            .format(&Rfc3339)
            .map_err(|_| Error::InvalidTimestamp(date_time.to_string()))?;

        Ok(Self { instant, raw })
    }

    /// The instant in UTC.
    pub fn instant(&self) -> OffsetDateTime {
        self.instant
    }

    /// The calendar date in UTC.
    pub fn date(&self) -> Date {
        self.instant.date()
    }

    /// The text the timestamp was created from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The category name and icon are a copy of the category at the time the
/// transaction was created. Later changes to the category, including deleting
/// it, do not change existing records.
///
/// To create a new `TransactionRecord`, use [TransactionRecord::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TransactionRecordData")]
pub struct TransactionRecord {
    /// The unique ID of the transaction.
    pub id: String,
    /// When the transaction happened.
    pub date: Timestamp,
    /// A text description of what the transaction was for, may be empty.
    pub description: String,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The name of the category at creation time.
    pub category: String,
    /// The icon of the category at creation time.
    pub category_icon: String,
}

/// The wire shape of a record before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecordData {
    id: String,
    date: Timestamp,
    #[serde(default)]
    description: Option<String>,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
    category_icon: String,
}

impl TryFrom<TransactionRecordData> for TransactionRecord {
    type Error = Error;

    fn try_from(data: TransactionRecordData) -> Result<Self, Self::Error> {
        if !data.amount.is_finite() || data.amount < 0.0 {
            return Err(Error::InvalidAmount(data.amount));
        }

        Ok(Self {
            id: data.id,
            date: data.date,
            description: data.description.unwrap_or_default(),
            amount: data.amount,
            kind: data.kind,
            category: data.category,
            category_icon: data.category_icon,
        })
    }
}

impl TransactionRecord {
    /// Create a new transaction in `category`.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        id: &str,
        amount: f64,
        date: OffsetDateTime,
        category: &Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: id.to_owned(),
            amount,
            date,
            description: String::new(),
            category: category.clone(),
        }
    }
}

/// A builder for creating [TransactionRecord] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::{date, datetime};
///
/// let groceries = Category::new("Groceries", "🛒", TransactionType::Expense)?;
/// let record = TransactionRecord::build("tx-1", 45.99, datetime!(2025-01-15 9:30 UTC), &groceries)
///     .description("Weekly shop")
///     .finalise(date!(2025 - 01 - 20))?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID the created record will have.
    pub id: String,

    /// The amount of money spent or earned. Must be greater than zero.
    pub amount: f64,

    /// When the transaction happened, in any offset.
    ///
    /// The date is stored in UTC and must not be in the future.
    pub date: OffsetDateTime,

    /// A human-readable description of the transaction.
    ///
    /// Defaults to an empty string.
    pub description: String,

    /// The category whose name, icon and type are copied onto the record.
    pub category: Category,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Validate the builder and create the record.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a finite number greater than zero,
    /// - or [Error::FutureDate] if the UTC date of the transaction is after `today`,
    /// - or [Error::InvalidTimestamp] if the date cannot be written as RFC 3339.
    pub fn finalise(self, today: Date) -> Result<TransactionRecord, Error> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let date = Timestamp::from_datetime(self.date)?;

        if date.date() > today {
            return Err(Error::FutureDate(date.date()));
        }

        Ok(TransactionRecord {
            id: self.id,
            date,
            description: self.description,
            amount: self.amount,
            kind: self.category.kind,
            category: self.category.name.to_string(),
            category_icon: self.category.icon.to_string(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

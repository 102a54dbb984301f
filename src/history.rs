//! Data access for transaction history.
//!
//! History is fetched through a [HistorySource] and kept in a [HistoryCache]
//! keyed by the endpoint and date range. The table engine only ever sees the
//! plain slice of records the cache hands out.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Error, date_range::DateRange, transaction::TransactionRecord};

/// The endpoint name used in cache keys.
const HISTORY_ENDPOINT: &str = "transactions-history";

/// Fetches the transactions that happened in a date range.
pub trait HistorySource {
    /// Fetch all transactions dated inside `range`, newest first.
    ///
    /// # Errors
    /// Implementations return an error if the history could not be fetched.
    fn fetch_history(&self, range: DateRange) -> Result<Vec<TransactionRecord>, Error>;
}

impl<F> HistorySource for F
where
    F: Fn(DateRange) -> Result<Vec<TransactionRecord>, Error>,
{
    fn fetch_history(&self, range: DateRange) -> Result<Vec<TransactionRecord>, Error> {
        self(range)
    }
}

/// Reads transaction history from a JSON file holding an array of records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source that reads the file at `path` on every fetch.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl HistorySource for JsonFileSource {
    fn fetch_history(&self, range: DateRange) -> Result<Vec<TransactionRecord>, Error> {
        let text = std::fs::read_to_string(&self.path).map_err(|error| {
            tracing::error!("could not read {:?}: {error}", self.path);
            Error::Io(error.to_string())
        })?;
        let records: Vec<TransactionRecord> = serde_json::from_str(&text)
            .inspect_err(|error| tracing::error!("could not parse {:?}: {error}", self.path))?;

        let mut records = records
            .into_iter()
            .filter(|record| range.contains(&record.date))
            .collect::<Vec<_>>();

        // Newest first, stable so records on the same instant keep file order.
        records.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::info!(
            "loaded {} transactions between {} and {}",
            records.len(),
            range.from(),
            range.to()
        );

        Ok(records)
    }
}

/// A pending request for the history of one date range.
///
/// Only the most recently issued request may update the rows the table shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    id: u64,
    key: String,
    range: DateRange,
}

impl HistoryRequest {
    /// The date range the request was issued for.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// The canonical cache key of the request.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// An explicit cache of fetched history, keyed by endpoint and date range.
#[derive(Debug, Default)]
pub struct HistoryCache {
    entries: HashMap<String, Vec<TransactionRecord>>,
    /// The ID of the next request to issue.
    next_id: u64,
    /// The most recently issued request.
    latest: Option<HistoryRequest>,
    /// Whether `latest` is still waiting for its response.
    pending: bool,
}

impl HistoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical cache key for the history of `range`, e.g.
    /// `transactions-history?from=2025-01-01&to=2025-03-31`.
    pub fn cache_key(range: DateRange) -> String {
        let query = serde_urlencoded::to_string([
            ("from", range.from().to_string()),
            ("to", range.to().to_string()),
        ])
        .unwrap_or_else(|error| {
            tracing::error!("could not encode history query: {error}");
            format!("from={}&to={}", range.from(), range.to())
        });

        format!("{HISTORY_ENDPOINT}?{query}")
    }

    /// Start a request for `range`, superseding any request still in flight.
    ///
    /// If the range is already cached the request can be completed straight
    /// away, but callers may still refetch to refresh the entry.
    pub fn begin(&mut self, range: DateRange) -> HistoryRequest {
        let request = HistoryRequest {
            id: self.next_id,
            key: Self::cache_key(range),
            range,
        };
        self.next_id += 1;

        if self.pending {
            if let Some(previous) = &self.latest {
                tracing::debug!("request for {} superseded by {}", previous.key, request.key);
            }
        }

        self.latest = Some(request.clone());
        self.pending = !self.entries.contains_key(&request.key);

        request
    }

    /// Apply the response to `request`.
    ///
    /// Returns `Ok(true)` if the rows were stored, or `Ok(false)` if a newer
    /// request was issued in the meantime and the response was discarded.
    ///
    /// # Errors
    /// Returns the fetch error if `request` is the latest request and its
    /// fetch failed. Errors for stale requests are discarded.
    pub fn complete(
        &mut self,
        request: HistoryRequest,
        result: Result<Vec<TransactionRecord>, Error>,
    ) -> Result<bool, Error> {
        let is_latest = self
            .latest
            .as_ref()
            .is_some_and(|latest| latest.id == request.id);

        if !is_latest {
            tracing::debug!("discarding stale response for {}", request.key);
            return Ok(false);
        }

        self.pending = false;
        let records = result?;
        self.entries.insert(request.key, records);

        Ok(true)
    }

    /// Whether the latest request is still waiting for its response.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// The rows for the latest request, or an empty slice if they have not
    /// arrived yet.
    pub fn current(&self) -> &[TransactionRecord] {
        self.latest
            .as_ref()
            .and_then(|latest| self.entries.get(&latest.key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get the history of `range`, fetching it from `source` on a cache miss.
    ///
    /// # Errors
    /// Returns the fetch error from `source`.
    pub fn load<S: HistorySource>(
        &mut self,
        source: &S,
        range: DateRange,
    ) -> Result<&[TransactionRecord], Error> {
        let request = self.begin(range);

        if self.entries.contains_key(request.key()) {
            tracing::debug!("cache hit for {}", request.key());
        } else {
            tracing::debug!("cache miss for {}", request.key());
            let result = source.fetch_history(range);
            self.complete(request, result)?;
        }

        Ok(self.current())
    }

    /// Drop every cached entry, e.g. after a transaction was created or deleted.
    pub fn invalidate(&mut self) {
        tracing::debug!("invalidating {} cached history entries", self.entries.len());
        self.entries.clear();
        self.pending = self.latest.is_some();
    }
}

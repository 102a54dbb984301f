//! Sorting rows by one or more columns.

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{table::columns::find_column, transaction::DerivedRow};

/// The order to sort rows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Sort in order of increasing value.
    #[serde(rename = "asc")]
    Ascending,
    /// Sort in order of decreasing value.
    #[serde(rename = "desc")]
    Descending,
}

/// Sort by `column` in `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The key of the column to sort by.
    pub column: String,
    /// The direction to sort in.
    pub direction: SortDirection,
}

impl FromStr for SortKey {
    type Err = String;

    /// Parse `column`, `column:asc` or `column:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            None => (s, SortDirection::Ascending),
            Some((column, "asc")) => (column, SortDirection::Ascending),
            Some((column, "desc")) => (column, SortDirection::Descending),
            Some((_, direction)) => {
                return Err(format!(
                    "unknown sort direction \"{direction}\", expected \"asc\" or \"desc\""
                ));
            }
        };

        Ok(SortKey {
            column: column.to_owned(),
            direction,
        })
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{}:{direction}", self.column)
    }
}

/// The sort keys applied to the table, most significant first.
///
/// An empty state leaves rows in their filtered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// No sorting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by a single column, replacing any existing sort.
    pub fn by(column: &str, direction: SortDirection) -> Self {
        Self {
            keys: vec![SortKey {
                column: column.to_owned(),
                direction,
            }],
        }
    }

    /// Create a sort from keys ordered most significant first.
    pub fn from_keys(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// The active sort keys.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Cycle the sort on `column` as a header click would: unsorted, then
    /// ascending, then descending, then unsorted again.
    ///
    /// Sorting a different column replaces the current sort.
    pub fn toggle(&mut self, column: &str) {
        let current = self
            .keys
            .first()
            .filter(|key| key.column == column)
            .map(|key| key.direction);

        *self = match current {
            None => Self::by(column, SortDirection::Ascending),
            Some(SortDirection::Ascending) => Self::by(column, SortDirection::Descending),
            Some(SortDirection::Descending) => Self::new(),
        };
    }

    /// Remove all sort keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Whether any sort key is set.
    pub fn is_active(&self) -> bool {
        !self.keys.is_empty()
    }

    fn compare(&self, a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
        for key in &self.keys {
            let Some(column) = find_column(&key.column) else {
                continue;
            };

            let ordering = match key.direction {
                SortDirection::Ascending => (column.comparator)(a, b),
                SortDirection::Descending => (column.comparator)(a, b).reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

/// Sort `rows` in place.
///
/// The sort is stable, rows that compare equal keep their relative order.
/// Keys for unknown columns are skipped.
pub fn sort_rows(rows: &mut [DerivedRow<'_>], sort: &SortState) {
    if !sort.is_active() {
        return;
    }

    for key in sort.keys() {
        if find_column(&key.column).is_none() {
            tracing::debug!("ignoring sort on unknown column {:?}", key.column);
        }
    }

    rows.sort_by(|a, b| sort.compare(a, b));
}

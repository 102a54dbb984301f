//! Column filters and the free-text search.

use std::collections::{BTreeMap, BTreeSet};

use crate::{table::columns::find_column, transaction::DerivedRow};

/// The filters the user has applied to the table.
///
/// Each column filter holds the set of accepted values; an empty or absent set
/// places no restriction on the column. The global filter is a free-text
/// search over the description, category, type and formatted amount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    columns: BTreeMap<String, BTreeSet<String>>,
    global: String,
}

impl FilterState {
    /// A filter that accepts every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only rows whose `column` value is one of `values`.
    ///
    /// Passing no values removes the column filter.
    pub fn set_column_filter<I, S>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<BTreeSet<_>>();

        if values.is_empty() {
            self.columns.remove(column);
        } else {
            self.columns.insert(column.to_owned(), values);
        }
    }

    /// Add `value` to the accepted values of `column`, or remove it if it is
    /// already accepted.
    pub fn toggle_value(&mut self, column: &str, value: &str) {
        let values = self.columns.entry(column.to_owned()).or_default();

        if !values.remove(value) {
            values.insert(value.to_owned());
        }

        if values.is_empty() {
            self.columns.remove(column);
        }
    }

    /// Remove the filter on `column`.
    pub fn clear_column(&mut self, column: &str) {
        self.columns.remove(column);
    }

    /// The values accepted for `column`, empty if the column is not filtered.
    pub fn column_values(&self, column: &str) -> impl Iterator<Item = &str> {
        self.columns
            .get(column)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Set the free-text search.
    pub fn set_global(&mut self, search: &str) {
        self.global = search.to_owned();
    }

    /// The free-text search.
    pub fn global(&self) -> &str {
        &self.global
    }

    /// Remove all column filters and the search text.
    pub fn clear(&mut self) {
        self.columns.clear();
        self.global.clear();
    }

    /// Whether any column filter or search text is set.
    pub fn has_active_filters(&self) -> bool {
        !self.columns.is_empty() || !self.global.is_empty()
    }

    /// Whether `row` passes every column filter and the search.
    pub fn matches(&self, row: &DerivedRow<'_>) -> bool {
        self.matches_columns(row) && self.matches_global(row)
    }

    fn matches_columns(&self, row: &DerivedRow<'_>) -> bool {
        self.columns.iter().all(|(key, accepted)| {
            if accepted.is_empty() {
                return true;
            }

            match find_column(key).and_then(|column| column.filter_value) {
                Some(value) => accepted.contains(value(row)),
                None => {
                    tracing::debug!("ignoring filter on unknown or unfilterable column {key:?}");
                    true
                }
            }
        })
    }

    fn matches_global(&self, row: &DerivedRow<'_>) -> bool {
        if self.global.is_empty() {
            return true;
        }

        let search = self.global.to_lowercase();

        row.searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&search))
    }
}

/// The rows that pass `filter`, in their original order.
pub fn filter_rows<'a>(rows: &[DerivedRow<'a>], filter: &FilterState) -> Vec<DerivedRow<'a>> {
    rows.iter().filter(|row| filter.matches(row)).cloned().collect()
}

//! Filter options derived from the loaded transactions.

use std::collections::HashSet;

use serde::Serialize;

use crate::transaction::{TransactionRecord, TransactionType};

/// A selectable value in a filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    /// The text shown to the user.
    pub label: String,
    /// The value stored in the filter state.
    pub value: String,
}

/// The options for every filterable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// One option per distinct category, labelled with its icon.
    pub categories: Vec<FacetOption>,
    /// The income and expense options.
    pub types: Vec<FacetOption>,
}

/// Build the filter options for `records`.
///
/// Categories are listed in order of first appearance and de-duplicated by
/// name; if a name appears with different icons, the first icon is used.
/// The type options do not depend on the data.
pub fn build_facets(records: &[TransactionRecord]) -> Facets {
    Facets {
        categories: category_options(records),
        types: type_options(),
    }
}

fn category_options(records: &[TransactionRecord]) -> Vec<FacetOption> {
    let mut seen = HashSet::new();

    records
        .iter()
        .filter(|record| seen.insert(record.category.as_str()))
        .map(|record| FacetOption {
            label: format!("{} {}", record.category_icon, record.category),
            value: record.category.clone(),
        })
        .collect()
}

fn type_options() -> Vec<FacetOption> {
    TransactionType::ALL
        .iter()
        .map(|kind| FacetOption {
            label: kind.label().to_owned(),
            value: kind.as_str().to_owned(),
        })
        .collect()
}

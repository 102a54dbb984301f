//! The column registry for the transaction table.
//!
//! Every column is described by data: how rows compare, whether the column
//! can be filtered and how a cell is rendered. The filter and sort engines
//! look columns up by key and never special-case a particular column.

use std::cmp::Ordering;

use time::{format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::transaction::DerivedRow;

/// The max number of graphemes to display in the description column before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Compares two rows by a column's natural value.
pub type Comparator = fn(&DerivedRow<'_>, &DerivedRow<'_>) -> Ordering;

/// Extracts the value column filters match against.
pub type FilterValue = for<'r, 'a> fn(&'r DerivedRow<'a>) -> &'r str;

/// Renders a cell for display.
pub type Renderer = fn(&DerivedRow<'_>) -> String;

/// A column of the transaction table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// The key used to refer to the column in filter and sort state.
    pub key: &'static str,
    /// The column header.
    pub title: &'static str,
    /// Orders rows ascending by the column's value.
    pub comparator: Comparator,
    /// The value column filters match against, `None` if the column cannot
    /// be filtered.
    pub filter_value: Option<FilterValue>,
    /// Renders the cell text.
    pub renderer: Renderer,
}

impl Column {
    /// Whether rows can be filtered by this column.
    pub fn filterable(&self) -> bool {
        self.filter_value.is_some()
    }
}

/// The columns of the transaction table, in display order.
pub static COLUMNS: [Column; 5] = [
    Column {
        key: "category",
        title: "Category",
        comparator: compare_category,
        filter_value: Some(category_value),
        renderer: render_category,
    },
    Column {
        key: "description",
        title: "Description",
        comparator: compare_description,
        filter_value: None,
        renderer: render_description,
    },
    Column {
        key: "date",
        title: "Date",
        comparator: compare_date,
        filter_value: None,
        renderer: render_date,
    },
    Column {
        key: "type",
        title: "Type",
        comparator: compare_type,
        filter_value: Some(type_value),
        renderer: render_type,
    },
    Column {
        key: "amount",
        title: "Amount",
        comparator: compare_amount,
        filter_value: None,
        renderer: render_amount,
    },
];

/// Look up a column by its key.
pub fn find_column(key: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|column| column.key == key)
}

fn compare_category(a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
    a.record.category.cmp(&b.record.category)
}

fn compare_description(a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
    a.record.description.cmp(&b.record.description)
}

fn compare_date(a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
    a.record.date.cmp(&b.record.date)
}

fn compare_type(a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
    a.record.kind.as_str().cmp(b.record.kind.as_str())
}

fn compare_amount(a: &DerivedRow<'_>, b: &DerivedRow<'_>) -> Ordering {
    a.record.amount.total_cmp(&b.record.amount)
}

fn category_value<'r>(row: &'r DerivedRow<'_>) -> &'r str {
    &row.record.category
}

fn type_value<'r>(row: &'r DerivedRow<'_>) -> &'r str {
    row.record.kind.as_str()
}

fn render_category(row: &DerivedRow<'_>) -> String {
    row.category_label()
}

fn render_description(row: &DerivedRow<'_>) -> String {
    let description = &row.record.description;

    if description.graphemes(true).count() <= MAX_DESCRIPTION_GRAPHEMES {
        description.to_owned()
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        truncated + "..."
    }
}

fn render_date(row: &DerivedRow<'_>) -> String {
    row.record
        .date
        .date()
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| row.record.date.as_str().to_owned())
}

fn render_type(row: &DerivedRow<'_>) -> String {
    row.record.kind.as_str().to_owned()
}

fn render_amount(row: &DerivedRow<'_>) -> String {
    row.formatted_amount.clone()
}

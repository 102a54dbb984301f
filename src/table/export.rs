//! CSV export of the filtered transactions.

use std::io::Write;

use serde::{Serialize, Serializer};

use crate::{
    Error,
    transaction::{DerivedRow, TransactionType},
};

/// The header row of an exported CSV document.
pub const EXPORT_HEADERS: [&str; 7] = [
    "category",
    "categoryIcon",
    "description",
    "type",
    "amount",
    "formattedAmount",
    "date",
];

/// One exported row, fields in the same order as [EXPORT_HEADERS].
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    category: &'a str,
    category_icon: &'a str,
    description: &'a str,
    kind: TransactionType,
    #[serde(serialize_with = "serialize_amount")]
    amount: f64,
    formatted_amount: &'a str,
    date: &'a str,
}

impl<'a> From<&'a DerivedRow<'a>> for ExportRecord<'a> {
    fn from(row: &'a DerivedRow<'a>) -> Self {
        Self {
            category: &row.record.category,
            category_icon: &row.record.category_icon,
            description: &row.record.description,
            kind: row.record.kind,
            amount: row.record.amount,
            formatted_amount: &row.formatted_amount,
            date: row.record.date.as_str(),
        }
    }
}

/// The largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole amounts are written without a fractional part, e.g. `10` rather
/// than `10.0`.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Write `rows` as CSV to `writer`.
///
/// The header row is always written, even when there are no rows. Dates are
/// written exactly as they were received.
///
/// # Errors
/// Returns [Error::Csv] if a row could not be written.
pub fn write_csv<W: Write>(rows: &[DerivedRow<'_>], writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADERS)?;

    for row in rows {
        csv_writer.serialize(ExportRecord::from(row))?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Export `rows` as a CSV document.
///
/// Given the same rows, the document is always byte-for-byte the same.
///
/// # Errors
/// Returns [Error::Csv] if a row could not be written.
pub fn export_csv(rows: &[DerivedRow<'_>]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::Csv(error.to_string()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use crate::{
        table::{FilterState, derive_rows, filter_rows},
        test_utils::{record_with, ten_records},
        transaction::TransactionType,
    };

    use super::export_csv;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct ParsedRow {
        category: String,
        category_icon: String,
        description: String,
        #[serde(rename = "type")]
        kind: String,
        amount: f64,
        formatted_amount: String,
        date: String,
    }

    fn parse(csv_text: &str) -> Vec<ParsedRow> {
        csv::Reader::from_reader(csv_text.as_bytes())
            .deserialize()
            .collect::<Result<Vec<ParsedRow>, _>>()
            .unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let records = vec![record_with(
            "1",
            TransactionType::Expense,
            "Groceries",
            1234.5,
            "2025-01-10T00:00:00.000Z",
            "Weekly shop",
        )];
        let rows = derive_rows(&records, "USD");

        let got = export_csv(&rows).unwrap();

        assert_eq!(
            got,
            "category,categoryIcon,description,type,amount,formattedAmount,date\n\
             Groceries,🛒,Weekly shop,expense,1234.5,\"$1,234.50\",2025-01-10T00:00:00.000Z\n"
        );
    }

    #[test]
    fn writes_whole_amounts_without_fraction() {
        let records = vec![record_with(
            "1",
            TransactionType::Income,
            "Salary",
            4200.0,
            "2025-01-09T00:00:00.000Z",
            "January pay",
        )];
        let rows = derive_rows(&records, "USD");

        let got = export_csv(&rows).unwrap();

        assert_eq!(
            got.lines().nth(1),
            Some("Salary,💰,January pay,income,4200,\"$4,200.00\",2025-01-09T00:00:00.000Z")
        );
    }

    #[test]
    fn empty_export_has_only_header() {
        let got = export_csv(&[]).unwrap();

        assert_eq!(
            got,
            "category,categoryIcon,description,type,amount,formattedAmount,date\n"
        );
    }

    #[test]
    fn exports_every_filtered_row_not_just_one_page() {
        let records = ten_records();
        let rows = derive_rows(&records, "USD");
        let mut filter = FilterState::new();
        filter.set_column_filter("type", ["expense"]);
        let filtered = filter_rows(&rows, &filter);

        let got = export_csv(&filtered).unwrap();

        assert_eq!(got.lines().count(), filtered.len() + 1);
        assert_eq!(parse(&got).len(), 6);
    }

    #[test]
    fn round_trips_special_characters() {
        let description = "Dinner, \"fancy\"\nwith friends";
        let records = vec![record_with(
            "1",
            TransactionType::Expense,
            "Groceries",
            10.0,
            "2025-01-10T00:00:00.000Z",
            description,
        )];
        let rows = derive_rows(&records, "EUR");

        let got = parse(&export_csv(&rows).unwrap());

        assert_eq!(
            got,
            [ParsedRow {
                category: "Groceries".to_owned(),
                category_icon: "🛒".to_owned(),
                description: description.to_owned(),
                kind: "expense".to_owned(),
                amount: 10.0,
                formatted_amount: "€10.00".to_owned(),
                date: "2025-01-10T00:00:00.000Z".to_owned(),
            }]
        );
    }

    #[test]
    fn export_is_deterministic() {
        let records = ten_records();
        let rows = derive_rows(&records, "USD");

        assert_eq!(export_csv(&rows).unwrap(), export_csv(&rows).unwrap());
    }
}

//! The display row derived from a transaction record.

use crate::{currency::format_amount, transaction::TransactionRecord};

/// A transaction record with the presentation fields computed from it.
///
/// Rows are derived fresh whenever the table is recomputed and only borrow the
/// record, so deriving a row never changes the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow<'a> {
    /// The record the row was derived from.
    pub record: &'a TransactionRecord,
    /// The record's amount formatted in the user's currency.
    pub formatted_amount: String,
}

impl<'a> DerivedRow<'a> {
    /// Derive the row for `record` using the currency code `currency`.
    pub fn new(record: &'a TransactionRecord, currency: &str) -> Self {
        Self {
            record,
            formatted_amount: format_amount(record.amount, currency),
        }
    }

    /// The category icon followed by the category name, e.g. "🛒 Groceries".
    pub fn category_label(&self) -> String {
        format!("{} {}", self.record.category_icon, self.record.category)
    }

    /// The fields the free-text search looks at.
    pub(crate) fn searchable_fields(&self) -> [&str; 4] {
        [
            &self.record.description,
            &self.record.category,
            self.record.kind.as_str(),
            &self.formatted_amount,
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        test_utils::record,
        transaction::{DerivedRow, TransactionType},
    };

    #[test]
    fn derives_formatted_amount_without_changing_record() {
        let source = record("1", TransactionType::Expense, "Groceries", 1234.5);
        let before = source.clone();

        let row = DerivedRow::new(&source, "USD");

        assert_eq!(row.formatted_amount, "$1,234.50");
        assert_eq!(before, source);
    }

    #[test]
    fn category_label_includes_icon() {
        let source = record("1", TransactionType::Income, "Salary", 10.0);

        let row = DerivedRow::new(&source, "USD");

        assert_eq!(row.category_label(), "💰 Salary");
    }
}

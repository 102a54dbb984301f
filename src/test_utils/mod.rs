#![allow(missing_docs)]

use crate::transaction::{Timestamp, TransactionRecord, TransactionType};

/// The icon used for a category in test records.
pub(crate) fn icon_for(category: &str) -> &'static str {
    match category {
        "Salary" => "💰",
        "Groceries" => "🛒",
        "Rent" => "🏠",
        "Transport" => "🚌",
        "Gifts" => "🎁",
        _ => "🏷️",
    }
}

/// A record dated 2025-01-01 with the description "{category} #{id}".
pub(crate) fn record(
    id: &str,
    kind: TransactionType,
    category: &str,
    amount: f64,
) -> TransactionRecord {
    record_with(
        id,
        kind,
        category,
        amount,
        "2025-01-01T00:00:00.000Z",
        &format!("{category} #{id}"),
    )
}

/// A record with every field given explicitly.
#[track_caller]
pub(crate) fn record_with(
    id: &str,
    kind: TransactionType,
    category: &str,
    amount: f64,
    date: &str,
    description: &str,
) -> TransactionRecord {
    TransactionRecord {
        id: id.to_owned(),
        date: Timestamp::parse(date).expect("test timestamps must be valid RFC 3339"),
        description: description.to_owned(),
        amount,
        kind,
        category: category.to_owned(),
        category_icon: icon_for(category).to_owned(),
    }
}

/// Ten records, six expenses and four income, in a fixed order.
pub(crate) fn ten_records() -> Vec<TransactionRecord> {
    use TransactionType::{Expense, Income};

    vec![
        record_with("1", Expense, "Groceries", 52.3, "2025-01-10T00:00:00.000Z", "Weekly shop"),
        record_with("2", Income, "Salary", 4200.0, "2025-01-09T00:00:00.000Z", "January pay"),
        record_with("3", Expense, "Rent", 1800.0, "2025-01-08T00:00:00.000Z", "Flat rent"),
        record_with("4", Expense, "Transport", 3.5, "2025-01-07T00:00:00.000Z", "Bus fare"),
        record_with("5", Income, "Gifts", 100.0, "2025-01-06T00:00:00.000Z", "Birthday money"),
        record_with("6", Expense, "Groceries", 18.75, "2025-01-05T00:00:00.000Z", "Corner store"),
        record_with("7", Income, "Salary", 250.0, "2025-01-04T00:00:00.000Z", "Overtime"),
        record_with("8", Expense, "Transport", 3.5, "2025-01-03T00:00:00.000Z", "Bus fare"),
        record_with("9", Income, "Gifts", 20.0, "2025-01-02T00:00:00.000Z", "Card from Gran"),
        record_with("10", Expense, "Groceries", 64.0, "2025-01-01T00:00:00.000Z", "Weekly shop"),
    ]
}

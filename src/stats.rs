//! Summary statistics over transaction history.
//!
//! Provides the overview totals, per-category breakdowns and the income and
//! expense history bucketed by day or month.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::transaction::{TransactionRecord, TransactionType};

/// Totals across a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// The number of transactions.
    pub transaction_count: usize,
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// Calculate the overview totals for `records`.
pub fn overview(records: &[TransactionRecord]) -> Overview {
    let (income, expense) = sum_by_type(records.iter());

    Overview {
        transaction_count: records.len(),
        income,
        expense,
        net: income - expense,
    }
}

/// The total for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The category icon.
    pub icon: String,
    /// Whether the category holds income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The sum of the category's transactions.
    pub total: f64,
    /// The category's share of the total for its type, from 0 to 100.
    pub percent: f64,
}

/// Sum the transactions of type `kind` per category.
///
/// Categories are ordered by total, largest first, and categories with equal
/// totals keep their order of first appearance. The icon is taken from the
/// first transaction in each category.
pub fn category_breakdown(
    records: &[TransactionRecord],
    kind: TransactionType,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in records.iter().filter(|record| record.kind == kind) {
        match totals
            .iter_mut()
            .find(|total| total.category == record.category)
        {
            Some(total) => total.total += record.amount,
            None => totals.push(CategoryTotal {
                category: record.category.clone(),
                icon: record.category_icon.clone(),
                kind,
                total: record.amount,
                percent: 0.0,
            }),
        }
    }

    let type_total: f64 = totals.iter().map(|total| total.total).sum();

    for total in &mut totals {
        total.percent = percent_of(total.total, type_total);
    }

    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// How history is bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// One bucket per day of a month.
    Month,
    /// One bucket per month of a year.
    Year,
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            other => Err(format!(
                "unknown timeframe \"{other}\", expected \"month\" or \"year\""
            )),
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Month => write!(f, "month"),
            Timeframe::Year => write!(f, "year"),
        }
    }
}

/// The month or year to show history for.
///
/// The month is ignored for [Timeframe::Year].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The month of the year.
    pub month: Month,
}

impl Period {
    /// The period containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// The income and expenses of one day or month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// The calendar year.
    pub year: i32,
    /// The month, from 1 to 12.
    pub month: u8,
    /// The day of the month, `None` for monthly buckets.
    pub day: Option<u8>,
    /// The sum of income in the bucket.
    pub income: f64,
    /// The sum of expenses in the bucket.
    pub expense: f64,
}

/// Bucket the income and expenses of `records` for `period`.
///
/// [Timeframe::Month] gives one point per day of the month and
/// [Timeframe::Year] one point per month of the year. Buckets without
/// transactions are zero. Transactions are placed by their UTC date.
pub fn history_data(
    records: &[TransactionRecord],
    timeframe: Timeframe,
    period: Period,
) -> Vec<HistoryPoint> {
    match timeframe {
        Timeframe::Month => days_of_month(period.year, period.month)
            .map(|date| {
                let (income, expense) =
                    sum_by_type(records.iter().filter(|record| record.date.date() == date));

                HistoryPoint {
                    year: period.year,
                    month: u8::from(period.month),
                    day: Some(date.day()),
                    income,
                    expense,
                }
            })
            .collect(),
        Timeframe::Year => months_of_year()
            .map(|month| {
                let (income, expense) = sum_by_type(records.iter().filter(|record| {
                    let date = record.date.date();
                    date.year() == period.year && date.month() == month
                }));

                HistoryPoint {
                    year: period.year,
                    month: u8::from(month),
                    day: None,
                    income,
                    expense,
                }
            })
            .collect(),
    }
}

/// The distinct years with transactions, oldest first.
///
/// Returns just `current_year` when there are no records.
pub fn history_periods(records: &[TransactionRecord], current_year: i32) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|record| record.date.date().year()).collect();

    if years.is_empty() {
        vec![current_year]
    } else {
        years.into_iter().collect()
    }
}

fn sum_by_type<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> (f64, f64) {
    records.fold((0.0, 0.0), |(income, expense), record| match record.kind {
        TransactionType::Income => (income + record.amount, expense),
        TransactionType::Expense => (income, expense + record.amount),
    })
}

fn days_of_month(year: i32, month: Month) -> impl Iterator<Item = Date> {
    (1..=31).map_while(move |day| Date::from_calendar_date(year, month, day).ok())
}

fn months_of_year() -> impl Iterator<Item = Month> {
    let mut month = Month::January;

    std::iter::once(month).chain((1..12).map(move |_| {
        month = month.next();
        month
    }))
}

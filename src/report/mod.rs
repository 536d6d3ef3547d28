//! Pure financial summaries over records already loaded into memory. Nothing
//! here touches storage or mutates its inputs.
//!
//! All date filtering is lexical prefix matching over ISO-8601 strings: a day
//! prefix is `YYYY-MM-DD`, a month prefix `YYYY-MM`. This works because every
//! stored `date` has a fixed year-month-day ordering, so string-prefix
//! equality coincides with calendar-range containment.

use chrono::{Days, NaiveDate};

use crate::models::{Expense, Transaction};

/// A record with a sale/outflow amount and an ISO-8601 timestamp.
pub trait Dated {
    fn date(&self) -> &str;
    fn amount(&self) -> i64;
}

impl Dated for Transaction {
    fn date(&self) -> &str {
        &self.date
    }
    fn amount(&self) -> i64 {
        self.amount
    }
}

impl Dated for Expense {
    fn date(&self) -> &str {
        &self.date
    }
    fn amount(&self) -> i64 {
        self.amount
    }
}

/// The subsequence whose `date` starts with `prefix`, relative order
/// preserved.
pub fn filter_by_date_prefix<'a, T: Dated>(records: &'a [T], prefix: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| r.date().starts_with(prefix))
        .collect()
}

pub fn sum_amount<'a, T, I>(records: I) -> i64
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records.into_iter().map(Dated::amount).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
    pub transaction_count: usize,
}

/// Income, expense and profit over the given records. A negative profit is a
/// valid result, not an error.
pub fn compute_summary(transactions: &[Transaction], expenses: &[Expense]) -> Summary {
    let income = sum_amount(transactions);
    let expense = sum_amount(expenses);
    Summary {
        income,
        expense,
        profit: income - expense,
        transaction_count: transactions.len(),
    }
}

/// Profit as a percentage of income, rounded to one decimal place. Zero
/// income yields 0.0 rather than dividing by zero.
pub fn margin_percent(income: i64, profit: i64) -> f64 {
    if income == 0 {
        return 0.0;
    }
    (profit as f64 / income as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Calendar day as `YYYY-MM-DD`.
    pub day: String,
    pub income: i64,
}

/// Daily income for `window_days` consecutive days starting at
/// `window_start`, in chronological order. Always produces exactly
/// `window_days` buckets; days without sales get income 0. A trailing
/// "last N days" window passes `today - (N - 1)` as the start.
pub fn bucket_by_day(
    transactions: &[Transaction],
    window_start: NaiveDate,
    window_days: usize,
) -> Vec<DayBucket> {
    (0..window_days)
        .filter_map(|offset| window_start.checked_add_days(Days::new(offset as u64)))
        .map(|date| {
            let day = date.format("%Y-%m-%d").to_string();
            let income = sum_amount(filter_by_date_prefix(transactions, &day));
            DayBucket { day, income }
        })
        .collect()
}

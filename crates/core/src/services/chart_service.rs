use chrono::{Datelike, NaiveDate};

use crate::models::chart::{MonthMatching, MonthlyBucket, SERIES_MONTHS};
use crate::models::transaction::Transaction;

/// Builds the six-month income/expense bar series.
///
/// Pure: no storage, no clock. The reference date is always supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Six buckets ending at `reference`'s month, oldest first, matched by
    /// calendar month regardless of year.
    #[must_use]
    pub fn monthly_series(&self, reference: NaiveDate, ledger: &[Transaction]) -> Vec<MonthlyBucket> {
        self.monthly_series_with(reference, ledger, MonthMatching::CalendarMonth)
    }

    /// Six buckets ending at `reference`'s month, oldest first.
    ///
    /// Each transaction lands in at most one bucket: the one whose month
    /// (and, for `YearQualified`, year) matches its date. Transactions
    /// outside the window contribute nothing.
    #[must_use]
    pub fn monthly_series_with(
        &self,
        reference: NaiveDate,
        ledger: &[Transaction],
        matching: MonthMatching,
    ) -> Vec<MonthlyBucket> {
        let mut buckets: Vec<MonthlyBucket> = (0..SERIES_MONTHS as i32)
            .rev()
            .map(|back| {
                let (year, month) = months_before(reference, back);
                MonthlyBucket::empty(year, month)
            })
            .collect();

        for tx in ledger {
            let bucket = buckets.iter_mut().find(|b| {
                b.month == tx.date.month()
                    && (matching == MonthMatching::CalendarMonth || b.year == tx.date.year())
            });
            if let Some(bucket) = bucket {
                if tx.is_income() {
                    bucket.income += tx.amount;
                } else {
                    bucket.expense += tx.amount;
                }
            }
        }

        buckets
    }
}

/// (year, month 1-12) of the month `back` months before `date`'s month.
fn months_before(date: NaiveDate, back: i32) -> (i32, u32) {
    let index = date.year() * 12 + date.month0() as i32 - back;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

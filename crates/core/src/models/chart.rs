use serde::{Deserialize, Serialize};

/// Number of months shown in the income/expense bar chart.
pub const SERIES_MONTHS: usize = 6;

/// Three-letter month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How a transaction date is matched to a monthly bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthMatching {
    /// Month of year only; a transaction from 12 months ago lands in the
    /// same bucket as one from this month.
    #[default]
    CalendarMonth,
    /// Year and month must both match the bucket.
    YearQualified,
}

/// One bar of the monthly chart.
///
/// The core computes the numbers; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Short month name, e.g. "Mar"
    pub label: String,

    /// Calendar year this bucket represents
    pub year: i32,

    /// Month number, 1-12
    pub month: u32,

    /// Summed income for the month
    pub income: f64,

    /// Summed expense for the month
    pub expense: f64,
}

impl MonthlyBucket {
    pub(crate) fn empty(year: i32, month: u32) -> Self {
        let label = MONTH_LABELS
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        Self {
            label: label.to_string(),
            year,
            month,
            income: 0.0,
            expense: 0.0,
        }
    }

    #[must_use]
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

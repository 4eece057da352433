use serde::{Deserialize, Serialize};

use super::chart::MonthlyBucket;
use super::transaction::{Category, Transaction};

/// Income, expense and the resulting balance of a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all income amounts
    pub income: f64,

    /// Sum of all expense amounts
    pub expense: f64,

    /// income - expense
    pub balance: f64,
}

/// Summed expense amount for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Expense distribution by category, in order of first occurrence in the ledger.
///
/// Only categories with at least one expense appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    #[must_use]
    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    /// Sum over all categories (equals the expense total of the ledger).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Add `amount` to `category`, appending the category on first sight.
    pub(crate) fn accumulate(&mut self, category: Category, amount: f64) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal { category, amount }),
        }
    }
}

/// Everything the dashboard renders, derived from one ledger snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub as_of_date: chrono::NaiveDate,
    pub totals: Totals,
    pub category_breakdown: CategoryBreakdown,
    /// Six monthly buckets, oldest first
    pub monthly_series: Vec<MonthlyBucket>,
    /// Newest-first head of the ledger
    pub recent_activity: Vec<Transaction>,
}

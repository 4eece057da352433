use chrono::NaiveDate;

use crate::models::analytics::{CategoryBreakdown, DashboardSnapshot, Totals};
use crate::models::chart::MonthMatching;
use crate::models::transaction::{Transaction, TransactionFilter};
use crate::services::chart_service::ChartService;

/// Derives dashboard and list views from a ledger snapshot.
///
/// Pure business logic: every method only reads its input slice, so the
/// same snapshot always yields identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsService {
    chart_service: ChartService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            chart_service: ChartService::new(),
        }
    }

    /// Income total, expense total and their difference.
    #[must_use]
    pub fn totals(&self, ledger: &[Transaction]) -> Totals {
        let (income, expense) = ledger.iter().fold((0.0, 0.0), |(income, expense), tx| {
            if tx.is_income() {
                (income + tx.amount, expense)
            } else {
                (income, expense + tx.amount)
            }
        });
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Summed expense per category, in order of first appearance.
    #[must_use]
    pub fn category_breakdown(&self, ledger: &[Transaction]) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::default();
        for tx in ledger.iter().filter(|tx| tx.is_expense()) {
            breakdown.accumulate(tx.category, tx.amount);
        }
        breakdown
    }

    /// The first `n` entries. Relies on the ledger already being newest-first.
    #[must_use]
    pub fn recent_activity<'a>(&self, ledger: &'a [Transaction], n: usize) -> &'a [Transaction] {
        &ledger[..n.min(ledger.len())]
    }

    /// Transactions list view: type filter plus a case-insensitive
    /// description search. Keeps ledger order.
    #[must_use]
    pub fn filter<'a>(
        &self,
        ledger: &'a [Transaction],
        filter: TransactionFilter,
        query: &str,
    ) -> Vec<&'a Transaction> {
        let needle = query.trim().to_lowercase();
        ledger
            .iter()
            .filter(|tx| filter.matches(tx))
            .filter(|tx| needle.is_empty() || tx.description.to_lowercase().contains(&needle))
            .collect()
    }

    /// Everything the dashboard shows, computed from one snapshot.
    #[must_use]
    pub fn dashboard(
        &self,
        ledger: &[Transaction],
        as_of_date: NaiveDate,
        recent: usize,
        matching: MonthMatching,
    ) -> DashboardSnapshot {
        DashboardSnapshot {
            as_of_date,
            totals: self.totals(ledger),
            category_breakdown: self.category_breakdown(ledger),
            monthly_series: self
                .chart_service
                .monthly_series_with(as_of_date, ledger, matching),
            recent_activity: self.recent_activity(ledger, recent).to_vec(),
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Direction of a ledger entry. The sign lives here, never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Closed set of transaction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Rent,
    Transport,
    Entertainment,
    Income,
    Other,
}

impl Category {
    /// Every category, in entry-form order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Rent,
        Category::Transport,
        Category::Entertainment,
        Category::Income,
        Category::Other,
    ];

    /// Categories offered by the entry form for a given transaction type:
    /// `Income` only for income, everything else for expenses.
    #[must_use]
    pub fn for_type(transaction_type: TransactionType) -> Vec<Category> {
        Self::ALL
            .into_iter()
            .filter(|c| match transaction_type {
                TransactionType::Income => *c == Category::Income,
                TransactionType::Expense => *c != Category::Income,
            })
            .collect()
    }

    /// Pre-selected category when the entry form opens.
    #[must_use]
    pub fn default_for(transaction_type: TransactionType) -> Category {
        match transaction_type {
            TransactionType::Income => Category::Income,
            TransactionType::Expense => Category::Food,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Income => "Income",
            Category::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Opaque transaction identifier, unique within its ledger.
///
/// Stored as a plain string so ledgers written with shorter legacy tokens
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a fresh identifier (random v4 UUID, hyphen-free).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single income or expense entry in an account's ledger.
///
/// Records are immutable once stored: they are created by an add and
/// destroyed by a remove, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier within the ledger
    pub id: TransactionId,

    /// Calendar date (no time component)
    pub date: NaiveDate,

    /// Free-text description
    pub description: String,

    /// Non-negative magnitude
    pub amount: f64,

    pub category: Category,

    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Materialize a draft under a freshly generated identifier.
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self::with_id(TransactionId::generate(), draft)
    }

    pub fn with_id(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            transaction_type: draft.transaction_type,
        }
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Everything a transaction carries except its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl TransactionDraft {
    /// An empty entry form for `transaction_type`, dated `today`.
    pub fn new(transaction_type: TransactionType, today: NaiveDate) -> Self {
        Self {
            date: today,
            description: String::new(),
            amount: 0.0,
            category: Category::default_for(transaction_type),
            transaction_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Entry-form checks: a description and a positive, finite amount.
    ///
    /// Category/type consistency is guided by [`Category::for_type`] but is
    /// not enforced here.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Description must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Parse an amount typed into the entry form.
pub fn parse_amount(input: &str) -> Result<f64, CoreError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed.parse().map_err(|_| {
        CoreError::ValidationError(format!("'{trimmed}' is not a valid amount"))
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Amount must be a positive number, got {trimmed}"
        )));
    }
    Ok(amount)
}

/// Type filter offered by the transactions list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expenses,
}

impl TransactionFilter {
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => tx.is_income(),
            TransactionFilter::Expenses => tx.is_expense(),
        }
    }
}

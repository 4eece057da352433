use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::transaction::{Category, Transaction, TransactionType};

/// Remote tables the mirror writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorTable {
    Profiles,
    Transactions,
    Orders,
}

impl MirrorTable {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorTable::Profiles => "profiles",
            MirrorTable::Transactions => "transactions",
            MirrorTable::Orders => "orders",
        }
    }
}

impl std::fmt::Display for MirrorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened account copy sent on sign-up. Carries the credential hash,
/// never the secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
}

impl From<&Account> for ProfileRecord {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            full_name: account.name.clone(),
            phone_number: account.phone.clone(),
            password_hash: account.credential.clone(),
        }
    }
}

/// Flattened transaction copy, tagged with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub user_email: String,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl TransactionRecord {
    pub fn new(user_email: &str, tx: &Transaction) -> Self {
        Self {
            user_email: user_email.to_string(),
            description: tx.description.clone(),
            amount: tx.amount,
            category: tx.category,
            date: tx.date,
            transaction_type: tx.transaction_type,
        }
    }
}

/// Premium plans a user can ask for. Activation happens by hand on the
/// remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumPlan {
    Monthly,
    Yearly,
    Support,
}

impl PremiumPlan {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PremiumPlan::Monthly => "Monthly",
            PremiumPlan::Yearly => "Yearly",
            PremiumPlan::Support => "Support",
        }
    }

    #[must_use]
    pub fn price(&self) -> &'static str {
        match self {
            PremiumPlan::Monthly => "$4.99",
            PremiumPlan::Yearly => "$35.88",
            PremiumPlan::Support => "Contact",
        }
    }
}

pub const ORDER_STATUS_PENDING: &str = "pending_manual_activation";

/// Upgrade request forwarded to the `orders` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub user_email: String,
    pub plan_type: String,
    pub amount: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn pending(user_email: &str, plan: PremiumPlan, created_at: DateTime<Utc>) -> Self {
        Self {
            user_email: user_email.to_string(),
            plan_type: plan.name().to_string(),
            amount: plan.price().to_string(),
            status: ORDER_STATUS_PENDING.to_string(),
            created_at,
        }
    }
}

use std::sync::Arc;

use crate::errors::CoreError;
use crate::events::{ChangeBus, ChangeEvent};
use crate::mirror::dispatcher::MirrorDispatcher;
use crate::models::account::normalize_email;
use crate::models::mirror::{MirrorTable, TransactionRecord};
use crate::models::transaction::{Transaction, TransactionDraft, TransactionId};
use crate::storage::backend::KeyValueStore;
use crate::storage::codec;
use crate::storage::keys::ledger_key;

/// Per-account transaction ledgers, newest first.
///
/// Every write persists the whole ledger and then publishes
/// `LedgerChanged(email)` in the same call, so a subscriber that re-reads
/// synchronously sees the new state. Concurrent writers for the same
/// account are last-write-wins at ledger granularity.
pub struct LedgerStore {
    store: Arc<dyn KeyValueStore>,
    bus: ChangeBus,
    mirror: MirrorDispatcher,
}

impl LedgerStore {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: ChangeBus, mirror: MirrorDispatcher) -> Self {
        Self { store, bus, mirror }
    }

    /// The persisted ledger of `email`. Never-used accounts and unreadable
    /// documents both yield an empty ledger.
    pub fn load(&self, email: &str) -> Result<Vec<Transaction>, CoreError> {
        let key = ledger_key(&normalize_email(email));
        let raw = self.store.get(&key)?;
        Ok(codec::decode_list_or_default(&key, raw.as_deref()))
    }

    /// Store `draft` under a fresh identifier at the front of the ledger.
    ///
    /// A copy is queued for the remote mirror; its outcome is never awaited.
    pub fn add(&self, email: &str, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let email = normalize_email(email);
        let mut transactions = self.load(&email)?;

        let mut id = TransactionId::generate();
        while transactions.iter().any(|t| t.id == id) {
            id = TransactionId::generate();
        }
        let transaction = Transaction::with_id(id, draft);

        transactions.insert(0, transaction.clone());
        self.save(&email, &transactions)?;

        self.mirror.submit(
            MirrorTable::Transactions,
            &TransactionRecord::new(&email, &transaction),
        );
        self.bus.publish(ChangeEvent::LedgerChanged(email));
        Ok(transaction)
    }

    /// Delete the transaction with `id`. Returns `false` (and writes nothing)
    /// when no such transaction exists.
    pub fn remove(&self, email: &str, id: &TransactionId) -> Result<bool, CoreError> {
        let email = normalize_email(email);
        let mut transactions = self.load(&email)?;
        let before = transactions.len();
        transactions.retain(|t| &t.id != id);
        if transactions.len() == before {
            return Ok(false);
        }

        self.save(&email, &transactions)?;
        self.bus.publish(ChangeEvent::LedgerChanged(email));
        Ok(true)
    }

    fn save(&self, email: &str, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.store
            .set(&ledger_key(email), &codec::encode(transactions)?)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::CoreError;
use crate::events::{ChangeBus, Subscription};
use crate::models::account::normalize_email;
use crate::models::transaction::Transaction;
use crate::services::ledger_service::LedgerStore;

/// In-memory snapshot of one account's ledger, kept fresh by the change bus.
///
/// A `LedgerChanged` for the attached account marks the snapshot stale; the
/// next read reloads it from storage. Attaching to another account drops the
/// old snapshot and subscription before anything else happens.
#[derive(Debug, Default)]
pub struct LedgerView {
    email: Option<String>,
    transactions: Vec<Transaction>,
    stale: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

impl LedgerView {
    /// A view attached to no account.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Point the view at `email` and load its ledger.
    pub fn attach(
        &mut self,
        ledger: &LedgerStore,
        bus: &ChangeBus,
        email: &str,
    ) -> Result<(), CoreError> {
        self.detach();

        let email = normalize_email(email);
        let stale = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&stale);
        let watched = email.clone();
        self.subscription = Some(bus.subscribe_filtered(
            move |event| event.affects_ledger(&watched),
            move |_| flag.store(true, Ordering::Release),
        ));
        self.stale = stale;
        self.email = Some(email);
        self.refresh(ledger)
    }

    /// Forget the current account entirely.
    pub fn detach(&mut self) {
        self.subscription = None;
        self.email = None;
        self.transactions.clear();
        self.stale = Arc::new(AtomicBool::new(false));
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Reload from storage unconditionally.
    pub fn refresh(&mut self, ledger: &LedgerStore) -> Result<(), CoreError> {
        match &self.email {
            Some(email) => {
                self.stale.store(false, Ordering::Release);
                self.transactions = ledger.load(email)?;
            }
            None => self.transactions.clear(),
        }
        Ok(())
    }

    /// Current transactions, reloading first if a change was signalled.
    pub fn transactions(&mut self, ledger: &LedgerStore) -> Result<&[Transaction], CoreError> {
        if self.is_stale() {
            self.refresh(ledger)?;
        }
        Ok(&self.transactions)
    }

    /// The cached snapshot as-is, without checking for staleness.
    #[must_use]
    pub fn cached(&self) -> &[Transaction] {
        &self.transactions
    }
}

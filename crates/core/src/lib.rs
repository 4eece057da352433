pub mod errors;
pub mod events;
pub mod mirror;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use events::{ChangeBus, ChangeEvent, Subscription};
use mirror::dispatcher::MirrorDispatcher;
use models::{
    account::{Profile, ProfileUpdate},
    analytics::DashboardSnapshot,
    mirror::{MirrorTable, OrderRecord, PremiumPlan},
    preferences::{ActiveView, Language, Theme},
    settings::AppConfig,
    transaction::{Transaction, TransactionDraft, TransactionFilter, TransactionId},
};
use services::{
    account_service::AccountDirectory, analytics_service::AnalyticsService,
    ledger_service::LedgerStore, ledger_view::LedgerView, preference_service::PreferenceService,
    session_service::SessionService,
};
use storage::backend::KeyValueStore;

use errors::CoreError;

/// Main entry point for the finance tracker core.
///
/// Wires every service to one storage backend, one change bus and one mirror
/// dispatcher, and keeps a cached view of the signed-in account's ledger.
#[must_use]
pub struct FinaTrack {
    config: AppConfig,
    bus: ChangeBus,
    mirror: MirrorDispatcher,
    directory: AccountDirectory,
    session: SessionService,
    ledger: LedgerStore,
    preferences: PreferenceService,
    analytics: AnalyticsService,
    ledger_view: LedgerView,
    active_view: ActiveView,
}

impl std::fmt::Debug for FinaTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinaTrack")
            .field("session", &self.ledger_view.email())
            .field("cached_transactions", &self.ledger_view.cached().len())
            .field("active_view", &self.active_view)
            .field("mirror", &self.mirror)
            .field("bus", &self.bus)
            .finish()
    }
}

impl FinaTrack {
    /// Open the core on `store`, mirroring to the REST backend described by
    /// `config.mirror` when it is enabled. A persisted session is resumed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(store: Arc<dyn KeyValueStore>, config: AppConfig) -> Result<Self, CoreError> {
        let mirror = MirrorDispatcher::from_settings(&config.mirror);
        Self::with_mirror(store, config, mirror)
    }

    /// Open the core with an explicit mirror dispatcher and a private bus.
    pub fn with_mirror(
        store: Arc<dyn KeyValueStore>,
        config: AppConfig,
        mirror: MirrorDispatcher,
    ) -> Result<Self, CoreError> {
        Self::with_bus(store, config, mirror, ChangeBus::new())
    }

    /// Open the core on a bus shared with other handles in this process, so
    /// writes through any of them reach every subscriber.
    pub fn with_bus(
        store: Arc<dyn KeyValueStore>,
        config: AppConfig,
        mirror: MirrorDispatcher,
        bus: ChangeBus,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let mut core = Self {
            directory: AccountDirectory::new(
                Arc::clone(&store),
                bus.clone(),
                mirror.clone(),
                config.credentials,
            ),
            session: SessionService::new(Arc::clone(&store), bus.clone()),
            ledger: LedgerStore::new(Arc::clone(&store), bus.clone(), mirror.clone()),
            preferences: PreferenceService::new(store, bus.clone()),
            analytics: AnalyticsService::new(),
            ledger_view: LedgerView::detached(),
            active_view: ActiveView::default(),
            config,
            bus,
            mirror,
        };

        if let Some(email) = core.session.current()? {
            tracing::info!(email = %email, "resuming persisted session");
            core.ledger_view.attach(&core.ledger, &core.bus, &email)?;
        }
        Ok(core)
    }

    /// Offline core over `store` with default settings.
    pub fn offline(store: Arc<dyn KeyValueStore>) -> Result<Self, CoreError> {
        Self::with_mirror(store, AppConfig::default(), MirrorDispatcher::disabled())
    }

    // ── Accounts & Session ──────────────────────────────────────────

    /// Register a new account and sign it in.
    pub fn sign_up(
        &mut self,
        email: &str,
        name: &str,
        secret: &str,
        phone: Option<&str>,
    ) -> Result<Profile, CoreError> {
        let account = self.directory.register(email, name, secret, phone)?;
        self.begin_session(&account.email)?;
        Ok(Profile::from_account(&account))
    }

    /// Verify credentials and sign the account in.
    pub fn sign_in(&mut self, email: &str, secret: &str) -> Result<Profile, CoreError> {
        let account = self.directory.authenticate(email, secret)?;
        self.begin_session(&account.email)?;
        Ok(Profile::from_account(&account))
    }

    /// End the session, drop the cached ledger and return to the dashboard.
    pub fn sign_out(&mut self) -> Result<(), CoreError> {
        self.session.end()?;
        self.ledger_view.detach();
        self.active_view = ActiveView::Dashboard;
        Ok(())
    }

    /// Email of the signed-in account, if any.
    pub fn current_email(&self) -> Result<Option<String>, CoreError> {
        self.session.current()
    }

    /// Profile of the signed-in account. A session whose account is missing
    /// from the directory gets a synthesized profile instead of an error.
    pub fn current_profile(&self) -> Result<Option<Profile>, CoreError> {
        let Some(email) = self.session.current()? else {
            return Ok(None);
        };
        let profile = match self.directory.lookup(&email)? {
            Some(account) => Profile::from_account(&account),
            None => {
                tracing::debug!(email = %email, "no directory entry for session, synthesizing profile");
                Profile::synthesized(&email)
            }
        };
        Ok(Some(profile))
    }

    /// Edit name and/or avatar of the signed-in account. Returns `None` when
    /// the session has no directory entry.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Option<Profile>, CoreError> {
        let email = self.require_session()?;
        Ok(self
            .directory
            .update_profile(&email, update)?
            .map(|account| Profile::from_account(&account)))
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Validate `draft` and record it at the top of the active ledger.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let email = self.require_session()?;
        draft.validate()?;
        self.ledger.add(&email, draft)
    }

    /// Delete a transaction from the active ledger. Returns `false` if it
    /// did not exist.
    pub fn remove_transaction(&mut self, id: &TransactionId) -> Result<bool, CoreError> {
        let email = self.require_session()?;
        self.ledger.remove(&email, id)
    }

    /// The active ledger, newest first.
    pub fn transactions(&mut self) -> Result<&[Transaction], CoreError> {
        self.sync_view()?;
        self.ledger_view.transactions(&self.ledger)
    }

    /// Transactions list view: type filter plus description search.
    pub fn filtered_transactions(
        &mut self,
        filter: TransactionFilter,
        query: &str,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.sync_view()?;
        let ledger = self.ledger_view.transactions(&self.ledger)?;
        Ok(self
            .analytics
            .filter(ledger, filter, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Dashboard aggregates as of today (UTC).
    pub fn dashboard(&mut self) -> Result<DashboardSnapshot, CoreError> {
        self.dashboard_at(Utc::now().date_naive())
    }

    /// Dashboard aggregates with an explicit reference date.
    pub fn dashboard_at(&mut self, as_of_date: NaiveDate) -> Result<DashboardSnapshot, CoreError> {
        self.sync_view()?;
        let ledger = self.ledger_view.transactions(&self.ledger)?;
        Ok(self.analytics.dashboard(
            ledger,
            as_of_date,
            self.config.dashboard.recent_activity,
            self.config.dashboard.month_matching,
        ))
    }

    // ── Preferences ─────────────────────────────────────────────────

    pub fn theme(&self) -> Result<Theme, CoreError> {
        self.preferences.theme()
    }

    pub fn toggle_theme(&self) -> Result<Theme, CoreError> {
        self.preferences.toggle_theme()
    }

    pub fn language(&self) -> Result<Language, CoreError> {
        self.preferences.language()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.preferences.set_theme(theme)
    }

    pub fn set_language(&self, language: Language) -> Result<(), CoreError> {
        self.preferences.set_language(language)
    }

    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    // ── Premium ─────────────────────────────────────────────────────

    /// Queue a pending upgrade order for the signed-in account. Local state
    /// is untouched; the order only goes to the remote mirror.
    pub fn request_upgrade(&self, plan: PremiumPlan) -> Result<OrderRecord, CoreError> {
        let email = self.require_session()?;
        let order = OrderRecord::pending(&email, plan, Utc::now());
        tracing::info!(email = %email, plan = plan.name(), "upgrade requested");
        self.mirror.submit(MirrorTable::Orders, &order);
        Ok(order)
    }

    // ── Change notifications ────────────────────────────────────────

    /// Register for change notifications; dropping the handle unsubscribes.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(handler)
    }

    #[must_use]
    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Internal ────────────────────────────────────────────────────

    fn begin_session(&mut self, email: &str) -> Result<(), CoreError> {
        let email = self.session.start(email)?;
        self.ledger_view.attach(&self.ledger, &self.bus, &email)
    }

    fn require_session(&self) -> Result<String, CoreError> {
        self.session.current()?.ok_or(CoreError::NoActiveSession)
    }

    /// Re-point the cached view if the persisted session moved underneath it,
    /// then reload it. Another handle on the same store may have written
    /// without publishing on this bus.
    fn sync_view(&mut self) -> Result<(), CoreError> {
        let email = self.require_session()?;
        if self.ledger_view.email() != Some(email.as_str()) {
            return self.ledger_view.attach(&self.ledger, &self.bus, &email);
        }
        self.ledger_view.refresh(&self.ledger)
    }
}

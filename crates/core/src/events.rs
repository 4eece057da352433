use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::models::preferences::PreferenceKind;

/// What changed in persisted state. Notifications carry identifiers only;
/// subscribers re-read whatever they display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    /// A directory entry was created or edited (normalized email).
    AccountChanged(String),
    /// The ledger of this normalized email was written.
    LedgerChanged(String),
    PreferenceChanged(PreferenceKind),
    /// The active session started or ended.
    SessionChanged,
}

impl ChangeEvent {
    /// True if this event invalidates the ledger of `email`.
    #[must_use]
    pub fn affects_ledger(&self, email: &str) -> bool {
        matches!(self, ChangeEvent::LedgerChanged(e) if e == email)
    }
}

type Handler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Handler)>>,
}

/// Process-wide broadcast of [`ChangeEvent`]s.
///
/// Delivery is synchronous: every handler registered at publish time has run
/// before `publish` returns. No ordering between handlers is promised.
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct ChangeBus {
    inner: Arc<BusInner>,
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event. The handler stays registered
    /// until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(handler)));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Register `handler` for the events accepted by `filter` only.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe_filtered<P, F>(&self, filter: P, handler: F) -> Subscription
    where
        P: Fn(&ChangeEvent) -> bool + Send + Sync + 'static,
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if filter(event) {
                handler(event);
            }
        })
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// The subscriber list is snapshotted first, so handlers may publish or
    /// (un)subscribe without deadlocking.
    pub fn publish(&self, event: ChangeEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        tracing::debug!(?event, subscribers = handlers.len(), "publishing change");
        for handler in handlers {
            handler(&event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

/// Registration handle returned by [`ChangeBus::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Explicitly unsubscribe (same as dropping the handle).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .retain(|(id, _)| *id != self.id);
        }
    }
}

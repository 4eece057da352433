use std::sync::Arc;

use crate::errors::CoreError;
use crate::events::{ChangeBus, ChangeEvent};
use crate::models::account::normalize_email;
use crate::storage::backend::KeyValueStore;
use crate::storage::keys::SESSION_ACTIVE_EMAIL;

/// Persists which account is signed in, so a reload resumes the session.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    bus: ChangeBus,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: ChangeBus) -> Self {
        Self { store, bus }
    }

    pub fn start(&self, email: &str) -> Result<String, CoreError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(CoreError::ValidationError(
                "Cannot start a session without an email".into(),
            ));
        }
        self.store.set(SESSION_ACTIVE_EMAIL, &email)?;
        tracing::info!(email = %email, "session started");
        self.bus.publish(ChangeEvent::SessionChanged);
        Ok(email)
    }

    pub fn end(&self) -> Result<(), CoreError> {
        self.store.remove(SESSION_ACTIVE_EMAIL)?;
        tracing::info!("session ended");
        self.bus.publish(ChangeEvent::SessionChanged);
        Ok(())
    }

    /// The active normalized email, if any. A blank persisted value counts
    /// as no session.
    pub fn current(&self) -> Result<Option<String>, CoreError> {
        Ok(self
            .store
            .get(SESSION_ACTIVE_EMAIL)?
            .map(|raw| normalize_email(&raw))
            .filter(|email| !email.is_empty()))
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use crate::errors::CoreError;
use crate::events::{ChangeBus, ChangeEvent};
use crate::mirror::dispatcher::MirrorDispatcher;
use crate::models::account::{local_part, normalize_email, Account, ProfileUpdate};
use crate::models::mirror::{MirrorTable, ProfileRecord};
use crate::storage::backend::KeyValueStore;
use crate::storage::codec;
use crate::storage::credentials::{self, KdfParams};
use crate::storage::keys::ACCOUNTS_DIRECTORY;

/// Owns the `accounts.directory` document: registration, credential checks
/// and profile edits.
pub struct AccountDirectory {
    store: Arc<dyn KeyValueStore>,
    bus: ChangeBus,
    mirror: MirrorDispatcher,
    kdf: KdfParams,
}

impl AccountDirectory {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        bus: ChangeBus,
        mirror: MirrorDispatcher,
        kdf: KdfParams,
    ) -> Self {
        Self {
            store,
            bus,
            mirror,
            kdf,
        }
    }

    /// Create an account. Fails with `AlreadyExists` if the normalized email
    /// is taken. A blank name falls back to the email's local part.
    ///
    /// A copy of the profile (credential hash only) is queued for the remote
    /// mirror; the outcome of that copy never affects registration.
    pub fn register(
        &self,
        email: &str,
        name: &str,
        secret: &str,
        phone: Option<&str>,
    ) -> Result<Account, CoreError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(CoreError::ValidationError("Email must not be empty".into()));
        }

        let mut accounts = self.load_all()?;
        if accounts.contains_key(&email) {
            return Err(CoreError::AlreadyExists(email));
        }

        let name = match name.trim() {
            "" => local_part(&email).to_string(),
            trimmed => trimmed.to_string(),
        };
        let phone = phone.map(str::trim).filter(|p| !p.is_empty()).map(String::from);

        let account = Account {
            email: email.clone(),
            name,
            credential: credentials::hash_secret(secret, &self.kdf)?,
            avatar: None,
            phone,
            created_at: Utc::now(),
            is_new_user: true,
        };

        accounts.insert(email.clone(), account.clone());
        self.save_all(&accounts)?;
        tracing::info!(email = %email, "account registered");

        self.mirror
            .submit(MirrorTable::Profiles, &ProfileRecord::from(&account));
        self.bus.publish(ChangeEvent::AccountChanged(email));
        Ok(account)
    }

    /// Check `secret` against the stored credential.
    ///
    /// On success the first-login flag is cleared and the updated account is
    /// returned. Accounts written with a plain-text credential are upgraded
    /// to a hash on their first successful sign-in.
    pub fn authenticate(&self, email: &str, secret: &str) -> Result<Account, CoreError> {
        let email = normalize_email(email);
        let mut accounts = self.load_all()?;
        let account = accounts
            .get_mut(&email)
            .ok_or_else(|| CoreError::NotFound(email.clone()))?;

        let legacy = !account.credential.starts_with("$argon2");
        let matches = if legacy {
            account.credential.as_bytes() == secret.as_bytes()
        } else {
            credentials::verify_secret(secret, &account.credential)?
        };
        if !matches {
            tracing::info!(email = %email, "sign-in rejected");
            return Err(CoreError::BadCredential);
        }

        if legacy {
            account.credential = credentials::hash_secret(secret, &self.kdf)?;
            tracing::info!(email = %email, "plain-text credential upgraded to hash");
        }
        account.is_new_user = false;
        let account = account.clone();

        self.save_all(&accounts)?;
        self.bus.publish(ChangeEvent::AccountChanged(email));
        Ok(account)
    }

    /// Merge `update` into an existing account. Returns `None` (and changes
    /// nothing) when there is no such account.
    pub fn update_profile(
        &self,
        email: &str,
        update: ProfileUpdate,
    ) -> Result<Option<Account>, CoreError> {
        let email = normalize_email(email);
        let mut accounts = self.load_all()?;
        let Some(account) = accounts.get_mut(&email) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                account.name = trimmed.to_string();
            }
        }
        if let Some(avatar) = update.avatar {
            account.avatar = Some(avatar);
        }
        let account = account.clone();

        self.save_all(&accounts)?;
        self.bus.publish(ChangeEvent::AccountChanged(email));
        Ok(Some(account))
    }

    pub fn lookup(&self, email: &str) -> Result<Option<Account>, CoreError> {
        let email = normalize_email(email);
        Ok(self.load_all()?.remove(&email))
    }

    /// Number of registered accounts.
    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.load_all()?.len())
    }

    fn load_all(&self) -> Result<BTreeMap<String, Account>, CoreError> {
        let raw = self.store.get(ACCOUNTS_DIRECTORY)?;
        Ok(codec::decode_map_or_default(ACCOUNTS_DIRECTORY, raw.as_deref()))
    }

    fn save_all(&self, accounts: &BTreeMap<String, Account>) -> Result<(), CoreError> {
        self.store.set(ACCOUNTS_DIRECTORY, &codec::encode(accounts)?)
    }
}

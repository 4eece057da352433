//! Persisted key layout.
//!
//! | Key | Value |
//! |---|---|
//! | `session.activeEmail` | normalized email (raw string) |
//! | `theme.preference` | `light` or `dark` (raw string) |
//! | `language.preference` | language code (raw string) |
//! | `accounts.directory` | JSON object: normalized email → account |
//! | `ledger.<normalizedEmail>` | JSON array of transactions, newest first |

pub const SESSION_ACTIVE_EMAIL: &str = "session.activeEmail";
pub const THEME_PREFERENCE: &str = "theme.preference";
pub const LANGUAGE_PREFERENCE: &str = "language.preference";
pub const ACCOUNTS_DIRECTORY: &str = "accounts.directory";

/// Namespace prefix shared by every per-account ledger key.
pub const LEDGER_NAMESPACE: &str = "ledger";

/// Storage key of the ledger owned by `normalized_email`.
#[must_use]
pub fn ledger_key(normalized_email: &str) -> String {
    format!("{LEDGER_NAMESPACE}.{normalized_email}")
}

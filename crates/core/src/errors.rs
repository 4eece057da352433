use thiserror::Error;

/// Unified error type for the entire finatrack-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Accounts / Session ──────────────────────────────────────────
    #[error("Email already exists: {0}")]
    AlreadyExists(String),

    #[error("No account found for {0}")]
    NotFound(String),

    #[error("Wrong password")]
    BadCredential,

    #[error("No active session")]
    NoActiveSession,

    #[error("Credential error: {0}")]
    Credential(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Malformed persisted state under '{key}': {message}")]
    MalformedPersistedState { key: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Remote mirror / Network ─────────────────────────────────────
    #[error("Mirror unavailable ({table}): {message}")]
    MirrorUnavailable {
        table: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for failures a user can act on from the sign-in / sign-up form.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CoreError::AlreadyExists(_)
                | CoreError::NotFound(_)
                | CoreError::BadCredential
                | CoreError::ValidationError(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors can carry the full request URL; keep the query out of logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(e: config::ConfigError) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<argon2::password_hash::Error> for CoreError {
    fn from(e: argon2::password_hash::Error) -> Self {
        CoreError::Credential(e.to_string())
    }
}

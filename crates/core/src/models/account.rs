use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Generator used when an account has no avatar of its own.
const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Normalize an email into a directory key: trimmed and lower-cased.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The part of an email before `@` (the whole string if there is no `@`).
#[must_use]
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Profile picture: a remote URL or an inlined `data:` payload.
///
/// Persisted as a plain string; the variant is recovered from the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Avatar {
    Url(String),
    Inline(String),
}

impl Avatar {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Avatar::Url(s) | Avatar::Inline(s) => s,
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self, Avatar::Inline(_))
    }
}

impl From<String> for Avatar {
    fn from(s: String) -> Self {
        if s.starts_with("data:") {
            Avatar::Inline(s)
        } else {
            Avatar::Url(s)
        }
    }
}

impl From<Avatar> for String {
    fn from(a: Avatar) -> Self {
        match a {
            Avatar::Url(s) | Avatar::Inline(s) => s,
        }
    }
}

/// A registered identity, keyed in the directory by its normalized email.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Normalized email (directory key)
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2id PHC string of the account secret
    #[serde(alias = "password")]
    pub credential: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Set at sign-up, cleared by the first successful sign-in
    #[serde(default)]
    pub is_new_user: bool,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("credential", &"<redacted>")
            .field("avatar", &self.avatar.as_ref().map(|a| a.is_inline()))
            .field("phone", &self.phone)
            .field("created_at", &self.created_at)
            .field("is_new_user", &self.is_new_user)
            .finish()
    }
}

/// Fields a user may change from the settings screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<Avatar>,
}

impl ProfileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            avatar: None,
        }
    }

    pub fn avatar(avatar: Avatar) -> Self {
        Self {
            name: None,
            avatar: Some(avatar),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none()
    }
}

/// What the UI shows for the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub avatar: Option<Avatar>,
    pub is_first_login: bool,
    /// True when no directory entry backed this profile.
    pub synthesized: bool,
}

impl Profile {
    pub fn from_account(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
            avatar: account.avatar.clone(),
            is_first_login: account.is_new_user,
            synthesized: false,
        }
    }

    /// Minimal profile for a session whose account is missing from the directory.
    pub fn synthesized(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: local_part(email).to_string(),
            avatar: None,
            is_first_login: false,
            synthesized: true,
        }
    }

    /// First word of the display name, used in the greeting.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// The stored avatar, or a generated one derived from the display name.
    #[must_use]
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(avatar) => avatar.as_str().to_string(),
            None => generated_avatar_url(&self.name),
        }
    }
}

fn generated_avatar_url(name: &str) -> String {
    Url::parse_with_params(
        AVATAR_SERVICE,
        &[
            ("name", name),
            ("background", "4F46E5"),
            ("color", "fff"),
            ("bold", "true"),
        ],
    )
    .map(String::from)
    .unwrap_or_else(|_| AVATAR_SERVICE.to_string())
}

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::chart::MonthMatching;
use crate::storage::credentials::KdfParams;

/// Environment variable prefix, e.g. `FINATRACK_MIRROR__BASE_URL`.
pub const ENV_PREFIX: &str = "FINATRACK";

/// Runtime configuration. Every section falls back to its defaults, so an
/// empty source yields a working offline setup (mirror disabled).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mirror: MirrorSettings,
    pub credentials: KdfParams,
    pub dashboard: DashboardSettings,
}

/// Where and how created records are forwarded.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSettings {
    pub enabled: bool,
    /// Project URL; requests go to `{base_url}/rest/v1/{table}`
    pub base_url: String,
    /// Static key sent both as `apikey` and as the bearer token
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for MirrorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorSettings")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// How many of the newest transactions the dashboard lists
    pub recent_activity: usize,
    pub month_matching: MonthMatching,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_activity: 3,
            month_matching: MonthMatching::CalendarMonth,
        }
    }
}

impl AppConfig {
    /// Layer an optional config file (TOML, JSON, ...) under `FINATRACK_*`
    /// environment variables. Sections are separated by `__`.
    pub fn load(path: Option<&str>) -> Result<Self, CoreError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        let settings: AppConfig = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.mirror.enabled && self.mirror.base_url.trim().is_empty() {
            return Err(CoreError::Config(
                "mirror.base_url is required when the mirror is enabled".into(),
            ));
        }
        if self.mirror.timeout_secs == 0 {
            return Err(CoreError::Config(
                "mirror.timeout_secs must be greater than zero".into(),
            ));
        }
        self.credentials.validate()
    }
}

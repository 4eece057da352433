use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::settings::MirrorSettings;

use super::traits::{MirrorAck, RemoteMirror};

/// PostgREST-style backend (Supabase and friends).
///
/// - **Endpoint**: `POST {base_url}/rest/v1/{table}`
/// - **Auth**: the same static key as `apikey` and as the bearer token
/// - **Body**: the flattened record as JSON, `Prefer: return=minimal`
pub struct RestMirror {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestMirror {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, 30)
    }

    pub fn from_settings(settings: &MirrorSettings) -> Self {
        Self::with_timeout(&settings.base_url, &settings.api_key, settings.timeout_secs)
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL of `table`'s collection endpoint.
    #[must_use]
    pub fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for RestMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestMirror")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RemoteMirror for RestMirror {
    fn name(&self) -> &str {
        "REST"
    }

    async fn forward(&self, table: &str, record: &Value) -> Result<MirrorAck, CoreError> {
        let response = self
            .client
            .post(self.endpoint(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| unavailable(table, None, CoreError::from(e).to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| unavailable(table, Some(status.as_u16()), CoreError::from(e).to_string()))?;

        if !status.is_success() {
            return Err(unavailable(table, Some(status.as_u16()), body));
        }

        if body.trim().is_empty() {
            return Ok(MirrorAck::Empty);
        }

        serde_json::from_str(&body)
            .map(MirrorAck::Created)
            .map_err(|e| {
                unavailable(
                    table,
                    Some(status.as_u16()),
                    format!("Failed to parse response: {e}"),
                )
            })
    }
}

fn unavailable(table: &str, status: Option<u16>, message: String) -> CoreError {
    CoreError::MirrorUnavailable {
        table: table.to_string(),
        status,
        message,
    }
}

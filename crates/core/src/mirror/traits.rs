use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;

/// What the remote store answered to a successful forward.
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorAck {
    /// 2xx with an empty body
    Empty,
    /// 2xx with the created representation
    Created(Value),
}

/// One-way sink for copies of locally created records.
///
/// The core never reads from a mirror and never lets a mirror result decide
/// local success; implementations only report what happened so it can be
/// logged.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RemoteMirror: Send + Sync {
    /// Human-readable name of this mirror (for logs).
    fn name(&self) -> &str;

    /// Create `record` in `table`. Any failure maps to
    /// `CoreError::MirrorUnavailable`.
    async fn forward(&self, table: &str, record: &Value) -> Result<MirrorAck, CoreError>;
}

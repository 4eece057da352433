use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::models::mirror::MirrorTable;
#[cfg(not(target_arch = "wasm32"))]
use crate::models::settings::MirrorSettings;

#[cfg(not(target_arch = "wasm32"))]
use super::rest::RestMirror;
use super::traits::RemoteMirror;

/// A record waiting to be forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorJob {
    pub table: MirrorTable,
    pub record: Value,
}

/// Fire-and-forget front of a [`RemoteMirror`].
///
/// `submit` only enqueues; a background task forwards jobs one at a time in
/// submission order, logs the outcome and moves on. Nothing is retried and
/// nothing is reported back to the submitter. The worker stops once every
/// clone of the dispatcher has been dropped and the queue is empty.
#[derive(Clone, Default)]
pub struct MirrorDispatcher {
    sender: Option<mpsc::UnboundedSender<MirrorJob>>,
}

impl std::fmt::Debug for MirrorDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorDispatcher")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl MirrorDispatcher {
    /// A dispatcher that drops everything.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Start a worker for `mirror` on the ambient tokio runtime.
    ///
    /// Outside a runtime the dispatcher comes back disabled.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(mirror: Arc<dyn RemoteMirror>) -> Self {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => Self::spawn_on(&handle, mirror),
            Err(_) => {
                tracing::debug!(mirror = mirror.name(), "no async runtime, remote mirror disabled");
                Self::disabled()
            }
        }
    }

    /// Start a worker for `mirror` on a specific runtime.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_on(handle: &tokio::runtime::Handle, mirror: Arc<dyn RemoteMirror>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        handle.spawn(run_worker(mirror, receiver));
        Self {
            sender: Some(sender),
        }
    }

    /// Build the REST mirror described by `settings`, or a disabled
    /// dispatcher if mirroring is switched off.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_settings(settings: &MirrorSettings) -> Self {
        if !settings.enabled {
            return Self::disabled();
        }
        Self::spawn(Arc::new(RestMirror::from_settings(settings)))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| !s.is_closed())
    }

    /// Queue `record` for `table`. Never blocks, never fails.
    pub fn submit<T: Serialize>(&self, table: MirrorTable, record: &T) {
        let Some(sender) = &self.sender else {
            tracing::debug!(%table, "mirror disabled, dropping record");
            return;
        };
        let record = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%table, error = %err, "record not serializable, dropping");
                return;
            }
        };
        if sender.send(MirrorJob { table, record }).is_err() {
            tracing::debug!(%table, "mirror worker stopped, dropping record");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn run_worker(mirror: Arc<dyn RemoteMirror>, mut receiver: mpsc::UnboundedReceiver<MirrorJob>) {
    while let Some(job) = receiver.recv().await {
        match mirror.forward(job.table.as_str(), &job.record).await {
            Ok(ack) => {
                tracing::debug!(mirror = mirror.name(), table = %job.table, ?ack, "record mirrored");
            }
            Err(err) => {
                tracing::warn!(mirror = mirror.name(), table = %job.table, error = %err, "mirror forward failed, record dropped");
            }
        }
    }
    tracing::debug!(mirror = mirror.name(), "mirror worker finished");
}

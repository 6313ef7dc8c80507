//! Timer-driven collection
//!
//! The collector loops on a fixed interval and publishes each successful
//! snapshot into a shared store that the metrics endpoint reads from.

use crate::collector::Collector;
use crate::model::Snapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Latest published snapshot, shared between the collector loop and readers
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    latest: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published snapshot
    pub async fn publish(&self, snapshot: Snapshot) {
        *self.latest.write().await = Some(Arc::new(snapshot));
    }

    /// The most recently published snapshot, if any cycle has succeeded yet
    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.read().await.clone()
    }
}

impl Collector {
    /// Runs one timer-mode cycle
    ///
    /// A successful snapshot is published; a failure is logged and leaves the
    /// previously published snapshot in place. Returns whether the cycle
    /// succeeded.
    pub async fn tick(&self, store: &SnapshotStore) -> bool {
        match self.run_cycle().await {
            Ok(snapshot) => {
                store.publish(snapshot).await;
                true
            }
            Err(e) => {
                tracing::error!("Error updating router stats: {}", e);
                false
            }
        }
    }

    /// Runs cycles forever, waiting `interval` after each one
    ///
    /// Failed cycles are not retried early; the next attempt happens on the
    /// next tick.
    pub async fn run_periodic(&self, interval: Duration, store: SnapshotStore) {
        tracing::info!("Collecting every {:?}", interval);
        loop {
            self.tick(&store).await;
            tokio::time::sleep(interval).await;
        }
    }
}

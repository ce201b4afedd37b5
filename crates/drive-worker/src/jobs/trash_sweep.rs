//! The scheduled trash sweep.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, warn};

use drive_service::trash::service::TrashService;

/// Purges items that have sat in the trash longer than the retention
/// window. Single-flight: a tick that fires while the previous sweep is
/// still running is skipped.
#[derive(Debug, Clone)]
pub struct TrashSweepJob {
    trash_service: TrashService,
    retention_days: u32,
    running: Arc<AtomicBool>,
}

impl TrashSweepJob {
    /// Creates the sweep job.
    pub fn new(trash_service: TrashService, retention_days: u32) -> Self {
        Self {
            trash_service,
            retention_days,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one sweep pass. Errors are logged, never propagated; the
    /// next tick simply tries again.
    pub async fn run(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Trash sweep still running, skipping this tick");
            return;
        }

        info!(retention_days = self.retention_days, "Trash sweep started");
        match self.trash_service.purge_expired(self.retention_days).await {
            Ok(stats) => info!(
                files_purged = stats.files_purged,
                folders_purged = stats.folders_purged,
                "Trash sweep finished"
            ),
            Err(e) => error!(error = %e, "Trash sweep failed"),
        }

        self.running.store(false, Ordering::SeqCst);
    }
}

//! Cron scheduler wiring.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::info;

use drive_core::config::WorkerConfig;
use drive_core::{AppError, AppResult};
use drive_service::trash::service::TrashService;

use crate::jobs::trash_sweep::TrashSweepJob;

/// Cron-based scheduler for the trash sweep.
pub struct SweepScheduler {
    scheduler: JobScheduler,
    job: Arc<TrashSweepJob>,
    cron: String,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler")
            .field("cron", &self.cron)
            .finish_non_exhaustive()
    }
}

impl SweepScheduler {
    /// Creates the scheduler with the sweep registered per config.
    pub async fn new(config: &WorkerConfig, trash_service: TrashService) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        let retention_days = u32::try_from(config.trash_retention_days.max(0)).unwrap_or(u32::MAX);
        let this = Self {
            scheduler,
            job: Arc::new(TrashSweepJob::new(trash_service, retention_days)),
            cron: config.trash_sweep_cron.clone(),
        };
        this.register_trash_sweep().await?;
        Ok(this)
    }

    /// Starts firing registered jobs.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;
        info!("Scheduler started");
        Ok(())
    }

    /// Stops the scheduler.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shut down scheduler: {e}")))?;
        info!("Scheduler shut down");
        Ok(())
    }

    async fn register_trash_sweep(&self) -> AppResult<()> {
        let job = Arc::clone(&self.job);
        let cron_job = CronJob::new_async(self.cron.as_str(), move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                job.run().await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid trash sweep cron expression: {e}"))
        })?;

        self.scheduler
            .add(cron_job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add trash sweep job: {e}")))?;

        info!(cron = %self.cron, "Registered: trash_sweep");
        Ok(())
    }
}

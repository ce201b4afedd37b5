//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Trash sweep worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the trash sweep (seconds-resolution, default hourly).
    #[serde(default = "default_sweep_cron")]
    pub trash_sweep_cron: String,
    /// How long soft-deleted rows stay restorable, in days.
    #[serde(default = "default_retention_days")]
    pub trash_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trash_sweep_cron: default_sweep_cron(),
            trash_retention_days: default_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_cron() -> String {
    "0 0 * * * *".to_string()
}

fn default_retention_days() -> i64 {
    30
}

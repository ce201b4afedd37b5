//! # drive-worker
//!
//! In-process scheduled tasks for Nimbus Drive. Currently a single cron
//! job: the trash sweep, which permanently purges items soft-deleted
//! longer ago than the configured retention.

pub mod jobs;
pub mod scheduler;

pub use jobs::trash_sweep::TrashSweepJob;
pub use scheduler::SweepScheduler;

//! Scheduled job implementations.

pub mod trash_sweep;

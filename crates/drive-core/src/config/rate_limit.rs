//! Rate limiter configuration.

use serde::{Deserialize, Serialize};

/// Token-bucket rate limiter tiers, keyed by client IP.
///
/// Three tiers mirror the API surface: a general bucket for every request,
/// a strict bucket for credential endpoints (login, register, link-share
/// resolution), and an upload bucket for upload initiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// General tier: max requests per window.
    #[serde(default = "default_general_max")]
    pub general_max_requests: u32,
    /// General tier: window in seconds.
    #[serde(default = "default_general_window")]
    pub general_window_seconds: u64,
    /// Auth tier: max requests per window.
    #[serde(default = "default_auth_max")]
    pub auth_max_requests: u32,
    /// Auth tier: window in seconds.
    #[serde(default = "default_auth_window")]
    pub auth_window_seconds: u64,
    /// Upload tier: max requests per window.
    #[serde(default = "default_upload_max")]
    pub upload_max_requests: u32,
    /// Upload tier: window in seconds.
    #[serde(default = "default_upload_window")]
    pub upload_window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_max_requests: default_general_max(),
            general_window_seconds: default_general_window(),
            auth_max_requests: default_auth_max(),
            auth_window_seconds: default_auth_window(),
            upload_max_requests: default_upload_max(),
            upload_window_seconds: default_upload_window(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_general_max() -> u32 {
    100
}

fn default_general_window() -> u64 {
    300
}

fn default_auth_max() -> u32 {
    10
}

fn default_auth_window() -> u64 {
    900
}

fn default_upload_max() -> u32 {
    20
}

fn default_upload_window() -> u64 {
    60
}

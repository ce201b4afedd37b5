//! Token-bucket rate limiting, keyed by client IP.
//!
//! Three tiers: a general bucket covering every API request, a strict
//! bucket for credential endpoints and public link resolution, and an
//! upload bucket for upload initiation. Buckets refill continuously at
//! `max_requests / window_seconds` per second.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::warn;

use drive_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Bucket-map size at which idle entries are swept before admitting a
/// new key.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

/// A shared token-bucket limiter over string keys.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_tokens: f64,
    refill_per_second: f64,
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
}

impl RateLimiter {
    /// A limiter allowing `max_requests` per `window_seconds` per key.
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        let max_tokens = f64::from(max_requests.max(1));
        Self {
            max_tokens,
            refill_per_second: max_tokens / window_seconds.max(1) as f64,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Takes one token for `key`; false means the caller is over budget.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        if buckets.len() >= SWEEP_THRESHOLD && !buckets.contains_key(key) {
            // A fully refilled bucket is indistinguishable from a fresh
            // one, so idle keys can be dropped without losing state.
            buckets.retain(|_, b| {
                let elapsed = now.duration_since(b.last_refill).as_secs_f64();
                b.tokens + elapsed * self.refill_per_second < self.max_tokens
            });
        }
        let bucket = buckets.entry(key.to_owned()).or_insert(TokenBucket {
            tokens: self.max_tokens,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_second).min(self.max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    async fn bucket_count(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// Best-effort client identity for keying buckets: first
/// `X-Forwarded-For` hop, then `X-Real-IP`, then a shared bucket.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn enforce(limiter: &RateLimiter, state: &AppState, req: Request, next: Next) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(req).await;
    }
    let key = client_key(req.headers());
    if !limiter.check(&key).await {
        warn!(client = %key, path = req.uri().path(), "Rate limit exceeded");
        return ApiError(AppError::rate_limited("Too many requests, slow down")).into_response();
    }
    next.run(req).await
}

/// General tier, applied to the whole `/api` surface.
pub async fn general_tier(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiter = state.rate_limiters.general.clone();
    enforce(&limiter, &state, req, next).await
}

/// Strict tier for credential endpoints and public link resolution.
pub async fn auth_tier(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiter = state.rate_limiters.auth.clone();
    enforce(&limiter, &state, req, next).await
}

/// Upload-initiation tier.
pub async fn upload_tier(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiter = state.rate_limiters.upload.clone();
    enforce(&limiter, &state, req, next).await
}

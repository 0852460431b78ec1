//! Fixed-window rate limiting for the API routes.
//!
//! Counts live in a process-wide map: expired entries are replaced lazily
//! on access and swept by a periodic background task. In a multi-process
//! deployment this must be backed by a shared store instead; the
//! per-process map does not generalize across replicas.

use axum::http::HeaderMap;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Rate limit applied to client log ingestion.
pub const LOGGING: RateLimitConfig = RateLimitConfig {
    id: "api-log",
    limit: 30,
    window_ms: 60_000,
};

/// Rate limit for sensitive operations such as minting share links.
pub const STRICT: RateLimitConfig = RateLimitConfig {
    id: "api-strict",
    limit: 10,
    window_ms: 60_000,
};

/// Configuration of one fixed-window limit.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Unique identifier for this limiter, part of the store key.
    pub id: &'static str,
    /// Maximum number of requests allowed within the window.
    pub limit: u32,
    /// Window length in milliseconds.
    pub window_ms: i64,
}

/// Outcome of a rate-limit check, also used to fill the
/// `X-RateLimit-*` response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Unix milliseconds at which the window resets.
    pub reset: i64,
}

struct Entry {
    count: u32,
    reset: i64,
}

/// Process-wide fixed-window counter store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<Mutex<HashMap<String, Entry>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check whether a request from `identifier` is allowed under `config`.
    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(identifier, config, Utc::now().timestamp_millis())
    }

    fn check_at(&self, identifier: &str, config: &RateLimitConfig, now: i64) -> RateLimitResult {
        let key = format!("{}:{identifier}", config.id);
        let mut store = self.store.lock().unwrap();

        let entry = store.get(&key);
        let expired = entry.map(|e| now > e.reset).unwrap_or(true);
        if expired {
            let reset = now + config.window_ms;
            store.insert(key, Entry { count: 1, reset });
            return RateLimitResult {
                success: true,
                limit: config.limit,
                remaining: config.limit - 1,
                reset,
            };
        }

        // Unwrap is fine: the expired branch above handled the None case.
        let entry = store.get_mut(&key).unwrap();
        if entry.count >= config.limit {
            return RateLimitResult {
                success: false,
                limit: config.limit,
                remaining: 0,
                reset: entry.reset,
            };
        }

        entry.count += 1;
        RateLimitResult {
            success: true,
            limit: config.limit,
            remaining: config.limit - entry.count,
            reset: entry.reset,
        }
    }

    /// Drop all expired entries.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis());
    }

    fn sweep_at(&self, now: i64) {
        let mut store = self.store.lock().unwrap();
        store.retain(|_, entry| now <= entry.reset);
    }

    /// Spawn the periodic sweeper task.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                limiter.sweep();
            }
        })
    }
}

/// Extract a client identifier from request headers.
///
/// Tries `x-forwarded-for` (first hop) and `x-real-ip` for proxy and CDN
/// setups before giving up.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.to_string();
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const TEST_LIMIT: RateLimitConfig = RateLimitConfig {
        id: "test",
        limit: 3,
        window_ms: 60_000,
    };

    #[test]
    fn test_counts_down_within_window() {
        let limiter = RateLimiter::new();
        let r1 = limiter.check_at("1.2.3.4", &TEST_LIMIT, 0);
        let r2 = limiter.check_at("1.2.3.4", &TEST_LIMIT, 10);
        assert!(r1.success && r2.success);
        assert_eq!(r1.remaining, 2);
        assert_eq!(r2.remaining, 1);
        assert_eq!(r1.reset, 60_000);
        assert_eq!(r2.reset, 60_000);
    }

    #[test]
    fn test_exhaustion_blocks_until_reset() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.check_at("1.2.3.4", &TEST_LIMIT, 0).success);
        }
        let blocked = limiter.check_at("1.2.3.4", &TEST_LIMIT, 1000);
        assert!(!blocked.success);
        assert_eq!(blocked.remaining, 0);

        // A new window starts after the reset time.
        let fresh = limiter.check_at("1.2.3.4", &TEST_LIMIT, 60_001);
        assert!(fresh.success);
        assert_eq!(fresh.remaining, 2);
    }

    #[test]
    fn test_identifiers_and_limiters_are_isolated() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            limiter.check_at("1.2.3.4", &TEST_LIMIT, 0);
        }
        assert!(!limiter.check_at("1.2.3.4", &TEST_LIMIT, 0).success);
        // Another client is unaffected.
        assert!(limiter.check_at("5.6.7.8", &TEST_LIMIT, 0).success);
        // Another limiter id is unaffected for the same client.
        assert!(limiter.check_at("1.2.3.4", &LOGGING, 0).success);
    }

    #[test]
    fn test_sweep_drops_expired_entries() {
        let limiter = RateLimiter::new();
        limiter.check_at("1.2.3.4", &TEST_LIMIT, 0);
        limiter.sweep_at(60_001);
        assert!(limiter.store.lock().unwrap().is_empty());
    }

    #[test]
    fn test_client_identifier_precedence() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_identifier(&headers), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static("9.9.9.9"));
        assert_eq!(client_identifier(&headers), "9.9.9.9");

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 10.0.0.1"),
        );
        assert_eq!(client_identifier(&headers), "1.2.3.4");
    }
}

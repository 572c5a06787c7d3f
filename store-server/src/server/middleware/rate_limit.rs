//! Per-IP Rate Limiting
//!
//! Sliding-window counter for sensitive endpoints (checkout, payment
//! upload). This map is the only long-lived in-process state besides
//! the notification queue.

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use parking_lot::Mutex;
use shared::AppError;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

/// Mutex-guarded sliding window of request timestamps per IP
#[derive(Debug)]
pub struct RateLimiter {
    requests: Mutex<HashMap<IpAddr, Vec<Instant>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit_per_minute: u32) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            limit: limit_per_minute as usize,
            window: Duration::from_secs(60),
        }
    }

    /// Record a hit for `ip`; `false` when the window is already full
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut requests = self.requests.lock();
        let times = requests.entry(ip).or_default();

        // Drop entries that left the window
        times.retain(|t| now.duration_since(*t) < self.window);

        if times.len() >= self.limit {
            return false;
        }
        times.push(now);
        true
    }
}

/// Axum middleware enforcing the state's rate limiter.
///
/// Requests without `ConnectInfo` (in-process test routers) share one
/// loopback bucket.
pub async fn rate_limit(
    State(state): State<crate::core::ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if !state.rate_limiter.check(ip) {
        tracing::warn!(%ip, path = %req.uri().path(), "Rate limit exceeded");
        return Err(AppError::too_many_requests());
    }
    Ok(next.run(req).await)
}

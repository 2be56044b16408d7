//! Fixed-window request rate limiting.
//!
//! One counter per client IP, reset when the window expires. This matches
//! the edge limiter of the original deployment (100 requests per 15
//! minutes) and deliberately stays simple: no sliding window, no shared
//! state across processes.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-IP fixed-window rate limiter.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request from `client` and report whether it is allowed.
    pub fn allow(&self, client: IpAddr) -> bool {
        self.allow_at(client, Instant::now())
    }

    fn allow_at(&self, client: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        // Drop expired windows wholesale so idle clients do not
        // accumulate in the map for the life of the process.
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let entry = windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        entry.count += 1;
        entry.count <= self.max_requests
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.lock().expect("rate limiter lock poisoned").len()
    }
}

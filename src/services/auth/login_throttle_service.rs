//! In-memory fixed-window throttle for login attempts.
//!
//! Each client key gets `max_attempts` tries per window; the counter resets
//! once the window has elapsed. The table is bounded: when it grows past
//! `max_keys` the entry with the oldest reset time is dropped.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use singleton_macro::service;
use crate::config::LoginThrottleConfig;
use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    max_attempts: u32,
    window: Duration,
    max_keys: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_attempts: LoginThrottleConfig::max_attempts(),
            window: LoginThrottleConfig::window(),
            max_keys: LoginThrottleConfig::max_keys(),
        }
    }
}

#[service(name = "login_throttle")]
pub struct LoginThrottleService {
    windows: Mutex<HashMap<String, Window>>,
    limits: Limits,
}

impl LoginThrottleService {
    pub fn with_limits(max_attempts: u32, window: Duration, max_keys: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limits: Limits {
                max_attempts,
                window,
                max_keys,
            },
        }
    }

    /// Counts one attempt for `key`; `RateLimited` once the limit is exceeded.
    pub fn check(&self, key: &str) -> Result<(), AppError> {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), AppError> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let window = windows
            .entry(key.to_string())
            .and_modify(|w| {
                if now > w.reset_at {
                    *w = Window {
                        count: 0,
                        reset_at: now + self.limits.window,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                reset_at: now + self.limits.window,
            });

        window.count += 1;
        let count = window.count;

        if count > self.limits.max_attempts {
            log::warn!("Login rate limit exceeded for {}", key);
            return Err(AppError::RateLimited);
        }

        if windows.len() > self.limits.max_keys {
            let oldest = windows
                .iter()
                .min_by_key(|(_, w)| w.reset_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                windows.remove(&oldest);
            }
        }

        Ok(())
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttle() -> LoginThrottleService {
        LoginThrottleService::with_limits(5, Duration::from_secs(60), 3)
    }

    #[test]
    fn test_allows_up_to_limit_then_rejects() {
        let throttle = throttle();
        let now = Instant::now();

        for _ in 0..5 {
            assert!(throttle.check_at("203.0.113.9", now).is_ok());
        }
        assert!(matches!(throttle.check_at("203.0.113.9", now), Err(AppError::RateLimited)));
    }

    #[test]
    fn test_keys_are_counted_separately() {
        let throttle = throttle();
        let now = Instant::now();

        for _ in 0..5 {
            throttle.check_at("a", now).unwrap();
        }
        assert!(throttle.check_at("b", now).is_ok());
    }

    #[test]
    fn test_window_resets_after_it_elapses() {
        let throttle = throttle();
        let start = Instant::now();

        for _ in 0..6 {
            let _ = throttle.check_at("a", start);
        }
        assert!(throttle.check_at("a", start + Duration::from_secs(30)).is_err());
        assert!(throttle.check_at("a", start + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn test_evicts_oldest_window_when_full() {
        let throttle = throttle();
        let start = Instant::now();

        for _ in 0..6 {
            let _ = throttle.check_at("noisy", start);
        }
        throttle.check_at("b", start + Duration::from_secs(1)).unwrap();
        throttle.check_at("c", start + Duration::from_secs(2)).unwrap();
        throttle.check_at("d", start + Duration::from_secs(3)).unwrap();

        assert_eq!(throttle.tracked_keys(), 3);
        // "noisy" had the oldest reset time and starts over.
        assert!(throttle.check_at("noisy", start + Duration::from_secs(4)).is_ok());
    }
}

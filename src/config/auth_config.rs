//! # Authentication settings
//!
//! JWT signing for admin sessions, the per-client login throttle and the
//! switch that closes self-service registration.
//!
//! ```bash
//! export AUTH_SECRET="long-random-string"   # JWT_SECRET is accepted too
//! export JWT_EXPIRATION_DAYS="7"
//! export LOGIN_RATE_LIMIT="5"
//! export LOGIN_RATE_WINDOW_SECONDS="60"
//! export REGISTRATION_ENABLED="false"
//! ```

use std::env;
use std::time::Duration;
use crate::config::Environment;

const DEVELOPMENT_SECRET: &str = "elite-gutters-development-secret-change-me";

/// HS256 token settings
pub struct JwtConfig;

impl JwtConfig {
    /// `AUTH_SECRET`, then `JWT_SECRET`.
    ///
    /// Falls back to a fixed development secret so that local runs work
    /// without setup; production startup refuses that through
    /// [`JwtConfig::require_secret`].
    pub fn secret() -> String {
        Self::configured_secret().unwrap_or_else(|| {
            log::warn!("AUTH_SECRET not set, using development secret");
            DEVELOPMENT_SECRET.to_string()
        })
    }

    /// Fails in production when no secret is configured.
    pub fn require_secret(environment: &Environment) -> Result<(), String> {
        Self::check_secret(environment, Self::configured_secret().is_some())
    }

    fn check_secret(environment: &Environment, configured: bool) -> Result<(), String> {
        if configured || !environment.is_production() {
            Ok(())
        } else {
            Err("AUTH_SECRET (or JWT_SECRET) must be set in production".to_string())
        }
    }

    fn configured_secret() -> Option<String> {
        env::var("AUTH_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn expiration_days() -> i64 {
        env::var("JWT_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|d: &i64| *d > 0)
            .unwrap_or(7)
    }

    pub fn cookie_name() -> &'static str {
        "auth_token"
    }

    /// Cookies are marked `Secure` outside development and test.
    pub fn secure_cookies() -> bool {
        matches!(
            Environment::current(),
            Environment::Production | Environment::Staging
        )
    }
}

/// Fixed-window limits for `POST /api/v1/login`.
pub struct LoginThrottleConfig;

impl LoginThrottleConfig {
    pub fn max_attempts() -> u32 {
        env::var("LOGIN_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(5)
    }

    pub fn window() -> Duration {
        let seconds = env::var("LOGIN_RATE_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &u64| *n > 0)
            .unwrap_or(60);
        Duration::from_secs(seconds)
    }

    /// Upper bound on tracked client keys.
    pub fn max_keys() -> usize {
        env::var("LOGIN_RATE_MAX_KEYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(500)
    }
}

pub struct RegistrationConfig;

impl RegistrationConfig {
    pub fn enabled() -> bool {
        env::var("REGISTRATION_ENABLED")
            .map(|v| Self::parse_flag(&v))
            .unwrap_or(true)
    }

    /// Anything other than an explicit "off" value counts as enabled.
    pub fn parse_flag(value: &str) -> bool {
        !matches!(
            value.trim().to_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_never_empty() {
        assert!(!JwtConfig::secret().is_empty());
    }

    #[test]
    fn test_production_requires_configured_secret() {
        assert!(JwtConfig::check_secret(&Environment::Production, false).is_err());
        assert!(JwtConfig::check_secret(&Environment::Production, true).is_ok());
        assert!(JwtConfig::check_secret(&Environment::Development, false).is_ok());
        assert!(JwtConfig::check_secret(&Environment::Staging, false).is_ok());
    }

    #[test]
    fn test_jwt_defaults() {
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 7);
        }
        assert_eq!(JwtConfig::cookie_name(), "auth_token");
    }

    #[test]
    fn test_login_throttle_defaults() {
        if env::var("LOGIN_RATE_LIMIT").is_err() {
            assert_eq!(LoginThrottleConfig::max_attempts(), 5);
        }
        if env::var("LOGIN_RATE_WINDOW_SECONDS").is_err() {
            assert_eq!(LoginThrottleConfig::window(), Duration::from_secs(60));
        }
        if env::var("LOGIN_RATE_MAX_KEYS").is_err() {
            assert_eq!(LoginThrottleConfig::max_keys(), 500);
        }
    }

    #[test]
    fn test_registration_flag_parsing() {
        assert!(RegistrationConfig::parse_flag("true"));
        assert!(RegistrationConfig::parse_flag("1"));
        assert!(RegistrationConfig::parse_flag("yes"));
        assert!(!RegistrationConfig::parse_flag("false"));
        assert!(!RegistrationConfig::parse_flag(" OFF "));
        assert!(!RegistrationConfig::parse_flag("0"));
    }
}

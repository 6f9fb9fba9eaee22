//! Admin session security.
//!
//! - [`TokenService`]: HS256 session tokens, also used by the auth middleware
//! - [`LoginThrottleService`]: per-client fixed-window limit on login attempts
//!
//! ```rust,ignore
//! use crate::services::auth::{LoginThrottleService, TokenService};
//!
//! LoginThrottleService::instance().check(&client_key)?;
//! let token = TokenService::instance().generate_token(&user)?;
//! ```

pub mod token_service;
pub mod login_throttle_service;

pub use token_service::TokenService;
pub use login_throttle_service::LoginThrottleService;

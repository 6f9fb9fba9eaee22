//! # Configuration
//!
//! Every setting is read from the process environment through a zero-sized
//! config struct with associated functions. `main` loads `.env`,
//! `.env.dev` or `.env.prod` (picked by `PROFILE`) before anything reads
//! these values.
//!
//! ## Modules
//!
//! - [`data_config`] - environment, server binding, CORS, caching, bcrypt
//! - [`auth_config`] - JWT signing, login throttling, registration switch
//! - [`site_config`] - public site URL and contact-form mail relay
//!
//! ## Environment variables
//!
//! ```bash
//! export ENVIRONMENT="production"          # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="elite_gutters"
//! export REDIS_URL="redis://localhost:6379"
//! export AUTH_SECRET="long-random-string"
//! export CORS_ALLOWED_ORIGINS="https://texaselitegutters.com"
//! export MAIL_API_URL="https://api.resend.com/emails"
//! export MAIL_API_KEY="re_..."
//! ```
//!
//! Values that fail to parse fall back to their defaults.

pub mod data_config;
pub mod auth_config;
pub mod site_config;

pub use data_config::*;
pub use auth_config::*;
pub use site_config::*;

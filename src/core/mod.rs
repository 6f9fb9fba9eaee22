//! # Core Framework Module
//!
//! Infrastructure shared by every layer of the backend.
//!
//! ## Modules
//!
//! ### [`registry`] - component container
//! - **ServiceLocator**: one shared `Arc<T>` per component type
//! - **Self-registration**: `#[repository]` and `#[service]` submit an
//!   `inventory` registration next to each definition
//! - **Lazy construction**: a component is built the first time it is asked for
//! - **Eager construction**: [`registry::ServiceLocator::initialize_all`]
//!   builds every registered component once at startup
//!
//! ### [`errors`] - error handling
//! - **AppError**: the application-wide error type
//! - **HTTP integration**: `ResponseError` maps each variant to a status code
//!
//! ## Startup sequence
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use elite_gutters_backend::core::registry::ServiceLocator;
//! use elite_gutters_backend::db::Database;
//!
//! let database = Arc::new(Database::new().await?);
//! ServiceLocator::set(database);
//! ServiceLocator::initialize_all().await?;
//! elite_gutters_backend::repositories::create_indexes().await?;
//!
//! let reviews = ReviewService::instance();
//! ```

pub mod registry;
pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
pub use registry::{Repository, Service, ServiceLocator};

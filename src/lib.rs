//! Texas Elite Gutters website backend.
//!
//! REST API behind the company's marketing site: the contact form, customer
//! reviews, the FAQ page, admin sign-in and visitor analytics built from
//! browser fingerprints. Also serves `sitemap.xml` and `robots.txt`.
//!
//! # Layers
//!
//! ```text
//! routes ─► handlers ─► services ─► repositories ─► MongoDB
//!                          │
//!                          └──► Redis (listing cache), mail relay
//! ```
//!
//! Repositories and services are shared singletons resolved through
//! [`core::registry::ServiceLocator`]:
//!
//! ```rust,ignore
//! use elite_gutters_backend::services::reviews::ReviewService;
//!
//! let reviews = ReviewService::instance().list().await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

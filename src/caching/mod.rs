//! Redis-backed cache for public listings.
//!
//! Values are stored as JSON. The cache is an optimisation only: callers
//! ignore its errors and fall back to MongoDB.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("reviews:all", &reviews, 300).await?;
//! let cached: Option<Vec<Review>> = cache.get("reviews:all").await?;
//! cache.invalidate_pattern("faqs:*").await?;
//! ```

pub mod redis;

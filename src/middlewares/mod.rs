//! Request middleware.
//!
//! [`AuthMiddleware`] resolves the caller from the session token and stores
//! an [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) in
//! request extensions. It never rejects a request; handlers decide through
//! the `AuthenticatedUser`, `OptionalUser` and `AdminUser` extractors.
//!
//! ```rust,ignore
//! web::scope("/api/v1")
//!     .wrap(AuthMiddleware::optional())
//!     .service(list_contacts) // takes AdminUser
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;

//! Business logic.
//!
//! Services sit between handlers and repositories: they normalise input,
//! enforce the rules handlers should not know about (password hashing,
//! cache invalidation, conversion tracking) and shape responses. Each one
//! is declared with `#[service]` and reached through `XxxService::instance()`.
//!
//! ```text
//! services/
//! ├── users/          registration and credential checks
//! ├── auth/           JWT issuing and login throttling
//! ├── contacts/       contact form intake and admin workflow
//! ├── reviews/        reviews with a Redis-cached list
//! ├── faqs/           FAQ entries with Redis-cached published lists
//! ├── analytics/      fingerprint sightings, page views, traffic report
//! ├── notifications/  contact form email
//! └── site/           sitemap.xml and robots.txt
//! ```

pub mod users;
pub mod auth;
pub mod contacts;
pub mod reviews;
pub mod faqs;
pub mod analytics;
pub mod notifications;
pub mod site;

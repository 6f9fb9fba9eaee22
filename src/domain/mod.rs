//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/   documents stored in MongoDB (users, contacts, reviews, faqs, thumbprints)
//! ├── dto/        request and response bodies of the HTTP API
//! └── models/     caller identity, token claims, analytics aggregates
//! ```
//!
//! Entities keep the camelCase field names of the existing site database.
//! DTOs own validation (`validator`) and the JSON shape the frontend reads;
//! services convert between the two.

pub mod entities;
pub mod dto;
pub mod models;

//! Documents stored in MongoDB.
//!
//! Field names are camelCase on disk (`createdAt`, `fingerprintHash`) to match
//! the documents the site has always written. None of these types is sent to
//! clients directly; see [`crate::domain::dto`] for the JSON shapes.

pub mod user;
pub mod contact;
pub mod review;
pub mod faq;
pub mod thumbprint;

pub use user::User;
pub use contact::{Contact, ContactStatus};
pub use review::{Review, ReviewSource};
pub use faq::Faq;
pub use thumbprint::{
    Conversion, Device, DeviceType, Interactions, Location, PageView, PageViewOutcome, Thumbprint,
    Visit,
};

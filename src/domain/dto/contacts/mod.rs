pub mod request;
pub mod response;

pub use request::{ContactListQuery, CreateContactRequest, UpdateContactRequest};
pub use response::{ContactCreatedResponse, ContactListResponse, ContactResponse, ContactUpdatedResponse};

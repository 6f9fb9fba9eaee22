pub mod request;
pub mod response;

pub use request::{CreateFaqRequest, FaqQuery, UpdateFaqRequest};
pub use response::{FaqListResponse, FaqResponse, FaqSavedResponse, SingleFaqResponse};

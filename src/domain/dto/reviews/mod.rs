pub mod request;
pub mod response;

pub use request::{CreateReviewRequest, UpdateReviewRequest};
pub use response::{ReviewListResponse, ReviewResponse, ReviewSavedResponse, SingleReviewResponse};

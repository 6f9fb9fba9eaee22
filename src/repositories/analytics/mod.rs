pub mod thumbprint_repo;

pub use thumbprint_repo::ThumbprintRepository;

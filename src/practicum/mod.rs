pub mod client;
pub mod response;
pub mod status;

pub use client::{PracticumClient, StatusSource};
pub use response::validate_response;
pub use status::parse_status;

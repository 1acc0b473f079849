pub mod native;
pub mod request;
pub mod response;

pub use request::{BidRequest, BidRequestBuilder};
pub use response::BidResponse;

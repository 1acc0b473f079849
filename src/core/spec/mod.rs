pub mod bidder;
pub mod media;

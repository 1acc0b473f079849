pub mod bid;
pub mod bidder;
pub mod context;
pub mod item;
pub mod message;
pub mod sync;

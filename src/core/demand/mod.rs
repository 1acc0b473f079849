/// Generic ORTB envelope building with bidder hooks
pub mod converter;
pub mod encoding;
pub mod interpret;
/// Flat per item json encoding
pub mod legacy;
pub mod ortb;

pub use encoding::{CodecSettings, DemandCodec, Partition, RequestEncoder, ResponseDecoder};
pub use legacy::LegacyCodec;
pub use ortb::OrtbCodec;

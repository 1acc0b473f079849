use crate::core::spec::media::MediaKind;

pub const BIDDER_CODE: &str = "smilewanted";

/// IAB global vendor list id
pub const GVL_ID: u32 = 639;

pub const ALIASES: [&str; 2] = ["smile", "sw"];

pub const SUPPORTED_MEDIA_TYPES: [MediaKind; 3] =
    [MediaKind::Banner, MediaKind::Video, MediaKind::Native];

pub const DEFAULT_ENDPOINT: &str = "https://prebid.smilewanted.com";

pub const DEFAULT_SYNC_ENDPOINT: &str = "https://csync.smilewanted.com";

/// Settlement currency used when no ad server currency is configured
pub const DEFAULT_CURRENCY: &str = "EUR";

pub const DEFAULT_TTL: u32 = 300;

/// Node fields, in wire order, sent for each supply chain hop
pub const SCHAIN_NODE_FIELDS: [&str; 7] = ["asi", "sid", "hp", "rid", "name", "domain", "ext"];

/// Global init routine exposed by the outstream player template
pub const OUTSTREAM_INIT_FN: &str = "SmileWantedOutStreamInit";

/// True if the code names this bidder or one of its aliases
pub fn is_bidder_code(code: &str) -> bool {
    let code = code.trim();

    code.eq_ignore_ascii_case(BIDDER_CODE)
        || ALIASES.iter().any(|alias| code.eq_ignore_ascii_case(alias))
}

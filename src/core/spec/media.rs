use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::warn;

/// The single authoritative media classification of a bid item,
/// used to partition a batch into outbound messages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaKind {
    Banner,
    Video,
    Native,
}

/// Video placement qualifier accepted by the endpoint
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VideoContext {
    Instream,
    Outstream,
}

/// Format tag embedded by the endpoint in each bid, which decides
/// how the returned markup is shaped. An absent tag means display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
pub enum FormatType {
    #[default]
    #[strum(serialize = "display")]
    Display,
    #[strum(serialize = "video_instream")]
    VideoInstream,
    #[strum(serialize = "video_outstream")]
    VideoOutstream,
    #[strum(serialize = "native")]
    Native,
}

impl FormatType {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") => FormatType::Display,
            Some(tag) => tag.parse().unwrap_or_else(|_| {
                warn!("Unrecognized format tag '{}', treating bid as display", tag);
                FormatType::Display
            }),
        }
    }
}

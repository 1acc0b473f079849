use crate::core::models::bidder::Encoding;
use crate::core::spec::media::MediaKind;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
}

/// A single request to send to the endpoint, built from one partition
/// of the batch. `data` is the serialized payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub method: HttpMethod,
    pub url: String,
    pub data: String,
    pub encoding: Encoding,
    pub media_kind: MediaKind,
    /// Ids of the items carried, in payload order
    pub bid_ids: Vec<String>,
}

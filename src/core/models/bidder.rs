use crate::core::spec::bidder::{DEFAULT_ENDPOINT, DEFAULT_SYNC_ENDPOINT};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Wire encoding spoken with the endpoint
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString, Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Encoding {
    /// OpenRTB 2.x bid request, one imp per message
    #[default]
    Ortb,
    /// Flat per item JSON payload
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
#[builder(default)]
pub struct Endpoint {
    #[builder(setter(into))]
    pub url: String,
    #[builder(setter(into))]
    pub sync_url: String,
    pub encoding: Encoding,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            sync_url: DEFAULT_SYNC_ENDPOINT.to_string(),
            encoding: Encoding::default(),
        }
    }
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Kind of deployment for a user sync URL, e.g. img or iframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncKind {
    /// User sync deployed as a single img pixel
    Image,
    /// User sync deployed as an iframe, can contain multiple downstream syncs
    Iframe,
}

/// Which sync deployments the page allows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncOptions {
    pub iframe_enabled: bool,
    pub pixel_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSync {
    #[serde(rename = "type")]
    pub kind: SyncKind,
    pub url: String,
}

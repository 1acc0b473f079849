use crate::core::floors::FloorProvider;
use crate::core::native::NativeParams;
use crate::core::openrtb::request::{Eid, SupplyChain, VideoParams};
use crate::core::spec::media::MediaKind;
use derivative::Derivative;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A declared width/height pair, `[w, h]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size(pub u32, pub u32);

impl Size {
    pub fn w(&self) -> u32 {
        self.0
    }

    pub fn h(&self) -> u32 {
        self.1
    }
}

/// Either a single `[w, h]` or a list of them, publishers declare both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeList {
    Single(Size),
    Many(Vec<Size>),
}

impl SizeList {
    pub fn first(&self) -> Option<Size> {
        match self {
            SizeList::Single(size) => Some(*size),
            SizeList::Many(sizes) => sizes.first().copied(),
        }
    }
}

/// Zone identifier assigned by the bidder, numeric in practice but
/// accepted as a string as well
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneId {
    Numeric(u64),
    Named(String),
}

impl ZoneId {
    pub fn is_set(&self) -> bool {
        match self {
            ZoneId::Numeric(id) => *id != 0,
            ZoneId::Named(id) => !id.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerMediaType {
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(
        rename = "playerSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub player_size: Option<SizeList>,
    #[serde(flatten)]
    pub params: VideoParams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(strip_option))]
pub struct MediaTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerMediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoMediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeParams>,
}

impl MediaTypes {
    /// Picks the authoritative kind when several are declared,
    /// video wins over native which wins over banner
    pub fn classify(&self) -> MediaKind {
        if self.video.is_some() {
            MediaKind::Video
        } else if self.native.is_some() {
            MediaKind::Native
        } else {
            MediaKind::Banner
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoBidderParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Bidder specific params. Only the zone id is required, anything
/// unrecognized is carried along untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase", default)]
#[builder(default)]
pub struct BidderParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub zone_id: Option<ZoneId>,
    /// Manual floor override, wins over any floor provider
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub bidfloor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub position_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub video: Option<VideoBidderParams>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl From<u64> for ZoneId {
    fn from(id: u64) -> Self {
        ZoneId::Numeric(id)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        ZoneId::Named(id.to_string())
    }
}

/// One line item of an auction batch as handed over by the orchestrator
#[derive(Clone, Serialize, Deserialize, Builder, Derivative)]
#[derivative(Debug)]
#[serde(rename_all = "camelCase")]
pub struct BidRequestItem {
    #[builder(setter(into))]
    pub bid_id: String,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub ad_unit_code: String,
    #[serde(default)]
    #[builder(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    #[builder(default)]
    pub media_types: MediaTypes,
    #[serde(default)]
    #[builder(default)]
    pub params: BidderParams,
    /// Identity envelope
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub user_id_as_eids: Vec<Eid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub schain: Option<SupplyChain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub transaction_id: Option<String>,
    #[serde(skip)]
    #[builder(default, setter(strip_option))]
    #[derivative(Debug = "ignore")]
    pub floor_provider: Option<Arc<dyn FloorProvider>>,
}

impl BidRequestItem {
    pub fn classify(&self) -> MediaKind {
        self.media_types.classify()
    }

    /// Video context of a video item, bidder params override the ad unit's
    pub fn video_context(&self) -> Option<&str> {
        let video = self.media_types.video.as_ref()?;

        self.params
            .video
            .as_ref()
            .and_then(|params| params.context.as_deref())
            .or(video.context.as_deref())
    }
}

use crate::core::models::item::{Size, ZoneId};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct BidRequest {
    #[builder(setter(into))]
    pub id: String,
    pub imp: Vec<Imp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub tmax: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cur: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub site: Option<Site>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub regs: Option<Regs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub ext: Option<RequestExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct Imp {
    #[builder(setter(into))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub tagid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub bidfloor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub bidfloorcur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub banner: Option<Banner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub native: Option<Native>,
    #[serde(default)]
    pub ext: ImpExt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

impl From<&Size> for Format {
    fn from(size: &Size) -> Self {
        Format {
            w: size.w(),
            h: size.h(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub format: Vec<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<u32>,
}

impl Banner {
    pub fn from_sizes(sizes: &[Size]) -> Self {
        Banner {
            format: sizes.iter().map(Format::from).collect(),
            pos: None,
        }
    }
}

/// The ORTB video fields a publisher may declare, shared between the
/// item declaration and the wire video object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minduration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdelay: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plcmt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linearity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipmin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipafter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minbitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxbitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playbackmethod: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(flatten)]
    pub params: VideoParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<VideoExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoExt {
    pub context: String,
}

/// Native imp object, the request is the json encoded native markup request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Native {
    pub request: String,
    pub ver: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidder: Option<ImpBidderExt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ImpExtData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpBidderExt {
    #[serde(rename = "zoneId")]
    pub zone_id: ZoneId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpExtData {
    pub pbadslot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnt: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicetype: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub tid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub ext: Option<SourceExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceExt {
    pub schain: SupplyChain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyChain {
    pub ver: String,
    pub complete: u8,
    #[serde(default)]
    pub nodes: Vec<SupplyChainNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

/// Third party identifier assertion from a single id source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eid {
    pub source: String,
    #[serde(default)]
    pub uids: Vec<Uid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Uid {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atype: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub ext: UserExt,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct UserExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub eids: Option<Vec<Eid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub consent: Option<String>,
}

impl UserExt {
    pub fn is_empty(&self) -> bool {
        self.eids.is_none() && self.consent.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regs {
    pub ext: RegsExt,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegsExt {
    pub gdpr: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct RequestExt {
    #[builder(setter(into))]
    pub prebid_version: String,
    /// Freeform placement hint, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub position_type: Option<String>,
}

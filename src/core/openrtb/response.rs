use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidResponse {
    #[serde(default)]
    pub id: String,
    /// Absent when the endpoint has no bid
    #[serde(default)]
    pub seatbid: Vec<SeatBid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cur: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatBid {
    #[serde(default)]
    pub bid: Vec<Bid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(default)]
    pub id: String,
    pub impid: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nurl: Option<String>,
    /// Kept loose, only copied through when it really is a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adomain: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<BidExt>,
}

impl Bid {
    fn bidder_ext(&self) -> Option<&SmileWantedBidExt> {
        self.ext.as_ref().and_then(|ext| ext.smilewanted.as_ref())
    }

    pub fn format_tag(&self) -> Option<&str> {
        self.bidder_ext()
            .and_then(|ext| ext.format_type_sw.as_deref())
    }

    pub fn outstream_template_url(&self) -> Option<&str> {
        self.bidder_ext()
            .and_then(|ext| ext.outstream_template_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smilewanted: Option<SmileWantedBidExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmileWantedBidExt {
    #[serde(rename = "formatTypeSw", default, skip_serializing_if = "Option::is_none")]
    pub format_type_sw: Option<String>,
    /// Field name is misspelled on the wire
    #[serde(
        rename = "OustreamTemplateUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub outstream_template_url: Option<String>,
}

//! OpenRTB Native 1.2 markup request and response objects

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NATIVE_VERSION: &str = "1.2";

pub mod image_type {
    pub const ICON: u8 = 1;
    pub const MAIN: u8 = 3;
}

pub mod event_type {
    pub const IMPRESSION: u32 = 1;
}

pub mod event_method {
    pub const IMG: u32 = 1;
    pub const JS: u32 = 2;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeRequest {
    pub ver: String,
    #[serde(default)]
    pub assets: Vec<AssetRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<u8>,
}

impl NativeRequest {
    pub fn asset(&self, id: u32) -> Option<&AssetRequest> {
        self.assets.iter().find(|asset| asset.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRequest {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<ImageRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleRequest {
    pub len: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wmin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<ImageRequestExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRequestExt {
    pub aspectratios: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRequest {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default)]
    pub imptrackers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jstracker: Option<String>,
    #[serde(default)]
    pub eventtrackers: Vec<EventTracker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<ImageResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub clicktrackers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTracker {
    pub event: u32,
    pub method: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

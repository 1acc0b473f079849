use crate::core::native::LegacyNativeResponse;
use serde::{Deserialize, Serialize};

/// Render routine installed on an outstream renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstreamRender {
    /// Global init function exposed by the player template
    pub init_fn: String,
    pub template_url: String,
}

/// Outstream player descriptor handed to the host page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderer {
    pub id: String,
    pub url: String,
    pub loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<OutstreamRender>,
}

/// What the bid actually carries, decided by the format tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mediaType", rename_all = "lowercase")]
pub enum Creative {
    #[serde(rename = "banner")]
    Display { ad: Option<String> },
    #[serde(rename_all = "camelCase")]
    Video {
        vast_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        renderer: Option<Renderer>,
    },
    Native {
        ad: Option<String>,
        native: LegacyNativeResponse,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_domains: Option<Vec<String>>,
}

/// A bid as returned to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBid {
    pub request_id: String,
    pub cpm: f64,
    pub currency: String,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
    pub net_revenue: bool,
    pub ttl: u32,
    #[serde(flatten)]
    pub creative: Creative,
    #[serde(default)]
    pub meta: BidMeta,
}

impl NormalizedBid {
    pub fn ad(&self) -> Option<&str> {
        match &self.creative {
            Creative::Display { ad } | Creative::Native { ad, .. } => ad.as_deref(),
            Creative::Video { .. } => None,
        }
    }

    pub fn vast_url(&self) -> Option<&str> {
        match &self.creative {
            Creative::Video { vast_url, .. } => vast_url.as_deref(),
            _ => None,
        }
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        match &self.creative {
            Creative::Video { renderer, .. } => renderer.as_ref(),
            _ => None,
        }
    }

    pub fn native(&self) -> Option<&LegacyNativeResponse> {
        match &self.creative {
            Creative::Native { native, .. } => Some(native),
            _ => None,
        }
    }
}

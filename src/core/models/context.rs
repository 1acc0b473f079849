use crate::core::openrtb::request::{Device, Site};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// GDPR consent signals. The string and the applicability flag are
/// independent, either may be present without the other
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GdprConsent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gdpr_applies: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefererInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFpd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
}

/// Publisher first party data in ORTB shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstPartyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceFpd>,
}

/// Values shared by every item of one auction round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase", default)]
#[builder(default)]
pub struct BatchContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub gdpr_consent: Option<GdprConsent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub us_privacy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub referer_info: Option<RefererInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub ortb2: Option<FirstPartyData>,
    /// Auction timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub timeout: Option<u64>,
}

impl BatchContext {
    pub fn consent_string(&self) -> Option<&str> {
        self.gdpr_consent
            .as_ref()
            .and_then(|c| c.consent_string.as_deref())
    }

    pub fn gdpr_applies(&self) -> Option<bool> {
        self.gdpr_consent.as_ref().and_then(|c| c.gdpr_applies)
    }

    pub fn referer_page(&self) -> Option<&str> {
        self.referer_info.as_ref().and_then(|r| r.page.as_deref())
    }

    pub fn site(&self) -> Option<&Site> {
        self.ortb2.as_ref().and_then(|fpd| fpd.site.as_ref())
    }

    pub fn device(&self) -> Option<&Device> {
        self.ortb2.as_ref().and_then(|fpd| fpd.device.as_ref())
    }

    pub fn source_tid(&self) -> Option<&str> {
        self.ortb2
            .as_ref()
            .and_then(|fpd| fpd.source.as_ref())
            .and_then(|source| source.tid.as_deref())
    }
}

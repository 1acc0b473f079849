use crate::core::demand::encoding::{CodecSettings, DemandCodec, Partition};
use crate::core::demand::interpret::WireBid;
use crate::core::floors;
use crate::core::models::bidder::Encoding;
use crate::core::models::context::BatchContext;
use crate::core::models::item::{BidRequestItem, VideoMediaType, ZoneId};
use crate::core::models::message::OutboundMessage;
use crate::core::native::{NativeParams, to_ortb_native_request};
use crate::core::openrtb::request::{Eid, Format};
use crate::core::schain;
use crate::core::spec::bidder::SCHAIN_NODE_FIELDS;
use crate::core::spec::media::{FormatType, VideoContext};
use anyhow::anyhow;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat per item payload of the legacy encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    pub zone_id: ZoneId,
    pub currency_code: String,
    pub tag_id: String,
    pub sizes: Vec<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    pub bid_id: String,
    /// Empty when undeclared
    #[serde(default)]
    pub position_type: String,
    pub prebid_version: String,
    /// Compact supply chain, empty when absent
    #[serde(default)]
    pub schain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_domain: Option<String>,
    #[serde(rename = "gdpr_consent", default, skip_serializing_if = "Option::is_none")]
    pub gdpr_consent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gdpr: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eids: Option<Vec<Eid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_params: Option<VideoMediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_params: Option<NativeParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_domains: Option<Value>,
}

/// Single bid answer of the legacy encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyResponse {
    pub cpm: f64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub creative_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_net_cpm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type_sw: Option<String>,
    #[serde(
        rename = "OustreamTemplateUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub outstream_template_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LegacyMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_sync_url: Option<String>,
}

/// Legacy flat JSON encoding of the endpoint
pub struct LegacyCodec {
    settings: CodecSettings,
}

impl LegacyCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }

    fn payload(&self, item: &BidRequestItem, batch: &BatchContext) -> Result<LegacyPayload, anyhow::Error> {
        let zone_id = item
            .params
            .zone_id
            .clone()
            .ok_or_else(|| anyhow!("Item {} has no zoneId", item.bid_id))?;

        let mut payload = LegacyPayload {
            zone_id,
            currency_code: self.settings.currency.clone(),
            tag_id: item.ad_unit_code.clone(),
            sizes: item.sizes.iter().map(Format::from).collect(),
            transaction_id: item.transaction_id.clone(),
            timeout: batch.timeout,
            bid_id: item.bid_id.clone(),
            position_type: item.params.position_type.clone().unwrap_or_default(),
            prebid_version: self.settings.integration_version.clone(),
            schain: item
                .schain
                .as_ref()
                .map(|chain| schain::serialize(chain, &SCHAIN_NODE_FIELDS))
                .unwrap_or_default(),
            bidfloor: floors::resolve(item, item.classify(), &self.settings.currency),
            page_domain: batch
                .referer_info
                .as_ref()
                .map(|info| info.page.clone().unwrap_or_default()),
            gdpr_consent: None,
            gdpr: None,
            eids: (!item.user_id_as_eids.is_empty()).then(|| item.user_id_as_eids.clone()),
            context: None,
            video_params: None,
            native_params: None,
            width: None,
            height: None,
        };

        if let Some(consent) = &batch.gdpr_consent {
            payload.gdpr_consent = consent.consent_string.clone();
            payload.gdpr = consent.gdpr_applies;
        }

        if let (Some(video), Some(context)) = (&item.media_types.video, item.video_context()) {
            if context.parse::<VideoContext>().is_ok() {
                let mut video_params = video.clone();
                video_params.context = Some(context.to_string());

                payload.context = Some(context.to_string());
                payload.video_params = Some(video_params);
            }
        }

        if let Some(native) = &item.media_types.native {
            payload.context = Some("native".to_string());
            payload.native_params = Some(native.clone());

            if let Some(size) = native
                .image
                .as_ref()
                .and_then(|image| image.sizes.as_ref())
                .and_then(|sizes| sizes.first())
            {
                payload.width = Some(size.w());
                payload.height = Some(size.h());
            }
        }

        Ok(payload)
    }
}

impl DemandCodec for LegacyCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Legacy
    }

    fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    fn encode(&self, partition: &Partition, batch: &BatchContext) -> Result<String, anyhow::Error> {
        let item = match partition.items.as_slice() {
            [item] => *item,
            items => {
                return Err(anyhow!(
                    "Legacy payload carries exactly one item, got {}",
                    items.len()
                ));
            }
        };

        Ok(serde_json::to_string(&self.payload(item, batch)?)?)
    }

    fn decode(&self, body: &Bytes, message: &OutboundMessage) -> Result<Vec<WireBid>, anyhow::Error> {
        let body: Value = serde_json::from_slice(body.as_ref())
            .map_err(|e| anyhow!("Failed decoding json response: {}", e))?;

        let is_empty = match &body {
            Value::Null => true,
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        };

        if is_empty {
            return Ok(Vec::new());
        }

        let response: LegacyResponse = serde_json::from_value(body)
            .map_err(|e| anyhow!("Unexpected legacy response: {}", e))?;

        let payload: LegacyPayload = serde_json::from_str(&message.data)
            .map_err(|e| anyhow!("Failed decoding originating payload: {}", e))?;

        let native_template = payload.native_params.as_ref().map(to_ortb_native_request);

        Ok(vec![WireBid {
            request_id: payload.bid_id,
            cpm: response.cpm,
            currency: response.currency,
            width: response.width,
            height: response.height,
            creative_id: response.creative_id,
            deal_id: response.deal_id,
            net_revenue: response.is_net_cpm,
            ttl: response.ttl,
            markup: response.ad,
            format: FormatType::from_tag(response.format_type_sw.as_deref()),
            outstream_template_url: response.outstream_template_url,
            advertiser_domains: response.meta.and_then(|meta| meta.advertiser_domains),
            native_template,
        }])
    }
}

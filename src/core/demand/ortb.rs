use crate::core::demand::converter::{ConversionContext, OrtbConverter, OrtbHooks};
use crate::core::demand::encoding::{CodecSettings, DemandCodec, Partition};
use crate::core::demand::interpret::WireBid;
use crate::core::floors;
use crate::core::models::bidder::Encoding;
use crate::core::models::context::BatchContext;
use crate::core::models::item::BidRequestItem;
use crate::core::models::message::OutboundMessage;
use crate::core::openrtb::native::NativeRequest;
use crate::core::openrtb::request::{
    Banner, BidRequest, Imp, ImpBidderExt, ImpExtData, Regs, RegsExt, RequestExtBuilder,
    SourceExt, User, UserExtBuilder, VideoExt,
};
use crate::core::openrtb::BidResponse;
use crate::core::schain;
use crate::core::spec::bidder::SCHAIN_NODE_FIELDS;
use crate::core::spec::media::{FormatType, MediaKind};
use anyhow::anyhow;
use bytes::Bytes;
use tracing::debug;

/// Endpoint specific decoration of the ORTB request
pub struct SmileWantedHooks;

impl OrtbHooks for SmileWantedHooks {
    fn imp(&self, mut imp: Imp, item: &BidRequestItem, ctx: &ConversionContext) -> Imp {
        if let Some(floor) = floors::resolve(item, ctx.media_kind, ctx.currency) {
            imp.bidfloor = Some(floor);
        }
        imp.bidfloorcur = Some(ctx.currency.to_string());

        imp.ext.bidder = item
            .params
            .zone_id
            .clone()
            .map(|zone_id| ImpBidderExt { zone_id });

        if !item.ad_unit_code.is_empty() {
            imp.tagid = Some(item.ad_unit_code.clone());
            imp.ext.data = Some(ImpExtData {
                pbadslot: item.ad_unit_code.clone(),
            });
        }

        match ctx.media_kind {
            MediaKind::Banner if imp.banner.is_none() && !item.sizes.is_empty() => {
                debug!("Banner {} declares no sizes, using item sizes", item.bid_id);
                imp.banner = Some(Banner::from_sizes(&item.sizes));
            }
            MediaKind::Video => {
                if let (Some(video), Some(context)) = (imp.video.as_mut(), item.video_context()) {
                    video.ext = Some(VideoExt {
                        context: context.to_string(),
                    });
                }
            }
            _ => {}
        }

        imp
    }

    fn request(
        &self,
        mut request: BidRequest,
        items: &[&BidRequestItem],
        batch: &BatchContext,
        ctx: &ConversionContext,
    ) -> BidRequest {
        // Items travel alone, batch level values come from the first one
        let lead = match items.first() {
            Some(lead) => *lead,
            None => return request,
        };

        let mut ext = RequestExtBuilder::default();
        ext.prebid_version(ctx.integration_version);
        if let Some(position_type) = lead.params.position_type.as_ref().filter(|p| !p.is_empty()) {
            ext.position_type(position_type.as_str());
        }
        request.ext = ext.build().ok();

        if let Some(timeout) = lead.timeout {
            request.tmax = Some(timeout);
        }

        let mut user_ext = UserExtBuilder::default();
        if !lead.user_id_as_eids.is_empty() {
            user_ext.eids(lead.user_id_as_eids.clone());
        }
        if let Some(consent) = batch.consent_string() {
            user_ext.consent(consent);
        }
        request.user = user_ext
            .build()
            .ok()
            .filter(|ext| !ext.is_empty())
            .map(|ext| User { ext });

        // Consent applicability is only forwarded when it applies
        if batch.gdpr_applies() == Some(true) {
            request.regs = Some(Regs {
                ext: RegsExt { gdpr: true },
            });
        }

        if let Some(page) = batch.referer_page() {
            let site = request.site.get_or_insert_with(Default::default);
            if site.page.is_none() {
                site.page = Some(page.to_string());
            }
        }

        if let Some(chain) = &lead.schain {
            let source = request.source.get_or_insert_with(Default::default);
            source.ext = Some(SourceExt {
                schain: schain::to_wire(chain, &SCHAIN_NODE_FIELDS),
            });
        }

        request
    }
}

/// OpenRTB 2.x encoding of the endpoint
pub struct OrtbCodec {
    settings: CodecSettings,
    converter: OrtbConverter<SmileWantedHooks>,
}

impl OrtbCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self {
            settings,
            converter: OrtbConverter::new(SmileWantedHooks),
        }
    }

    fn fallback_size(imp: &Imp) -> (u32, u32) {
        if let Some(format) = imp.banner.as_ref().and_then(|b| b.format.first()) {
            return (format.w, format.h);
        }

        imp.video
            .as_ref()
            .map(|v| (v.w.unwrap_or_default(), v.h.unwrap_or_default()))
            .unwrap_or_default()
    }
}

impl DemandCodec for OrtbCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Ortb
    }

    fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    fn encode(&self, partition: &Partition, batch: &BatchContext) -> Result<String, anyhow::Error> {
        let ctx = ConversionContext {
            media_kind: partition.kind,
            currency: &self.settings.currency,
            integration_version: &self.settings.integration_version,
        };

        let request = self.converter.to_ortb(&partition.items, batch, &ctx)?;

        Ok(serde_json::to_string(&request)?)
    }

    fn decode(&self, body: &Bytes, message: &OutboundMessage) -> Result<Vec<WireBid>, anyhow::Error> {
        let response: BidResponse = serde_json::from_slice(body.as_ref())
            .map_err(|e| anyhow!("Failed decoding json response: {}", e))?;

        let request: BidRequest = serde_json::from_str(&message.data)
            .map_err(|e| anyhow!("Failed decoding originating request: {}", e))?;

        let mut bids = Vec::new();

        for bid in response.seatbid.iter().flat_map(|seat| seat.bid.iter()) {
            let imp = request
                .imp
                .iter()
                .find(|imp| imp.id == bid.impid)
                .ok_or_else(|| anyhow!("Bid {} references unknown imp {}", bid.id, bid.impid))?;

            let native_template = match &imp.native {
                Some(native) => Some(serde_json::from_str::<NativeRequest>(&native.request)?),
                None => None,
            };

            let (fallback_w, fallback_h) = Self::fallback_size(imp);

            bids.push(WireBid {
                request_id: imp.id.clone(),
                cpm: bid.price,
                currency: response.cur.clone(),
                width: bid.w.unwrap_or(fallback_w),
                height: bid.h.unwrap_or(fallback_h),
                creative_id: bid.crid.clone().unwrap_or_else(|| bid.id.clone()),
                deal_id: bid.dealid.clone(),
                net_revenue: None,
                ttl: bid.exp,
                markup: bid.adm.clone(),
                format: FormatType::from_tag(bid.format_tag()),
                outstream_template_url: bid.outstream_template_url().map(str::to_string),
                advertiser_domains: bid.adomain.clone(),
                native_template,
            });
        }

        Ok(bids)
    }
}

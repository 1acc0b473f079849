use crate::core::models::context::BatchContext;
use crate::core::models::item::BidRequestItem;
use crate::core::native::to_ortb_native_request;
use crate::core::openrtb::native::NATIVE_VERSION;
use crate::core::openrtb::request::{
    Banner, BidRequest, BidRequestBuilder, Imp, ImpBuilder, Native, SourceBuilder, Video,
};
use crate::core::spec::media::MediaKind;
use anyhow::anyhow;
use uuid::Uuid;

/// Values shared by every imp and request built for one partition
#[derive(Debug, Clone, Copy)]
pub struct ConversionContext<'a> {
    pub media_kind: MediaKind,
    /// Settlement currency
    pub currency: &'a str,
    pub integration_version: &'a str,
}

/// Bidder specific decoration applied on top of the base ORTB objects
pub trait OrtbHooks: Send + Sync {
    fn imp(&self, imp: Imp, _item: &BidRequestItem, _ctx: &ConversionContext) -> Imp {
        imp
    }

    fn request(
        &self,
        request: BidRequest,
        _items: &[&BidRequestItem],
        _batch: &BatchContext,
        _ctx: &ConversionContext,
    ) -> BidRequest {
        request
    }
}

/// Builds ORTB requests from items, the generic parts are done here and
/// the hooks add whatever the endpoint expects on top
pub struct OrtbConverter<H: OrtbHooks> {
    hooks: H,
}

impl<H: OrtbHooks> OrtbConverter<H> {
    pub fn new(hooks: H) -> Self {
        Self { hooks }
    }

    pub fn base_imp(
        item: &BidRequestItem,
        ctx: &ConversionContext,
    ) -> Result<Imp, anyhow::Error> {
        let mut builder = ImpBuilder::default();
        builder.id(item.bid_id.clone());

        match ctx.media_kind {
            MediaKind::Banner => {
                let sizes = item
                    .media_types
                    .banner
                    .as_ref()
                    .map(|banner| banner.sizes.as_slice())
                    .unwrap_or_default();

                if !sizes.is_empty() {
                    let mut banner = Banner::from_sizes(sizes);
                    banner.pos = item.media_types.banner.as_ref().and_then(|b| b.pos);
                    builder.banner(banner);
                }
            }
            MediaKind::Video => {
                if let Some(declared) = &item.media_types.video {
                    let size = declared.player_size.as_ref().and_then(|s| s.first());

                    builder.video(Video {
                        params: declared.params.clone(),
                        w: size.map(|s| s.w()),
                        h: size.map(|s| s.h()),
                        ext: None,
                    });
                }
            }
            MediaKind::Native => {
                if let Some(declared) = &item.media_types.native {
                    let request = serde_json::to_string(&to_ortb_native_request(declared))?;

                    builder.native(Native {
                        request,
                        ver: NATIVE_VERSION.to_string(),
                    });
                }
            }
        }

        let mut imp = builder.build()?;
        imp.ext.tid = item.transaction_id.clone();

        Ok(imp)
    }

    pub fn base_request(
        imps: Vec<Imp>,
        batch: &BatchContext,
        ctx: &ConversionContext,
    ) -> Result<BidRequest, anyhow::Error> {
        let mut builder = BidRequestBuilder::default();
        builder
            .id(Uuid::new_v4().to_string())
            .imp(imps)
            .cur(vec![ctx.currency.to_string()]);

        if let Some(site) = batch.site() {
            builder.site(site.clone());
        }

        if let Some(device) = batch.device() {
            builder.device(device.clone());
        }

        if let Some(tid) = batch.source_tid() {
            builder.source(SourceBuilder::default().tid(tid).build()?);
        }

        Ok(builder.build()?)
    }

    /// Converts the items into a single request, one imp per item
    pub fn to_ortb(
        &self,
        items: &[&BidRequestItem],
        batch: &BatchContext,
        ctx: &ConversionContext,
    ) -> Result<BidRequest, anyhow::Error> {
        if items.is_empty() {
            return Err(anyhow!("Cannot build a bid request without items"));
        }

        let imps = items
            .iter()
            .map(|item| Ok(self.hooks.imp(Self::base_imp(item, ctx)?, item, ctx)))
            .collect::<Result<Vec<_>, anyhow::Error>>()?;

        let request = Self::base_request(imps, batch, ctx)?;

        Ok(self.hooks.request(request, items, batch, ctx))
    }
}

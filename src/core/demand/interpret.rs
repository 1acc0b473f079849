use crate::core::demand::encoding::CodecSettings;
use crate::core::models::bid::{BidMeta, Creative, NormalizedBid, OutstreamRender, Renderer};
use crate::core::native::{parse_native_markup, to_legacy_response};
use crate::core::openrtb::native::NativeRequest;
use crate::core::spec::bidder::OUTSTREAM_INIT_FN;
use crate::core::spec::media::FormatType;
use anyhow::{anyhow, bail};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Encoding independent view of one bid from the endpoint, before it is
/// shaped by its format tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireBid {
    pub request_id: String,
    pub cpm: f64,
    pub currency: Option<String>,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    pub deal_id: Option<String>,
    pub net_revenue: Option<bool>,
    pub ttl: Option<u32>,
    pub markup: Option<String>,
    pub format: FormatType,
    pub outstream_template_url: Option<String>,
    /// Copied only when it really is a list of strings
    pub advertiser_domains: Option<Value>,
    /// Native declaration the bid answers, in ORTB form
    pub native_template: Option<NativeRequest>,
}

fn advertiser_domains(value: Option<&Value>) -> Option<Vec<String>> {
    let list = value?.as_array()?;

    list.iter()
        .map(|domain| domain.as_str().map(str::to_string))
        .collect()
}

/// Builds the outstream renderer descriptor. A template url that cannot be
/// parsed leaves the renderer without a render routine, the bid stays playable
pub fn outstream_renderer(request_id: &str, template_url: Option<&str>) -> Renderer {
    let url = template_url.unwrap_or_default().to_string();

    let render = match Url::parse(&url) {
        Ok(parsed) => Some(OutstreamRender {
            init_fn: OUTSTREAM_INIT_FN.to_string(),
            template_url: parsed.to_string(),
        }),
        Err(e) => {
            warn!(
                "Failed installing outstream render for {}, template url '{}': {}",
                request_id, url, e
            );
            None
        }
    };

    Renderer {
        id: request_id.to_string(),
        url,
        loaded: false,
        render,
    }
}

/// Shapes a wire bid into its normalized result according to the format tag
pub fn shape(wire: WireBid, settings: &CodecSettings) -> Result<NormalizedBid, anyhow::Error> {
    if wire.request_id.is_empty() {
        bail!("Bid has no request id to link back to");
    }

    debug!("Shaping bid {} as {}", wire.request_id, wire.format);

    let creative = match wire.format {
        FormatType::Display => Creative::Display { ad: wire.markup },
        FormatType::VideoInstream => Creative::Video {
            vast_url: wire.markup,
            renderer: None,
        },
        FormatType::VideoOutstream => Creative::Video {
            vast_url: wire.markup,
            renderer: Some(outstream_renderer(
                &wire.request_id,
                wire.outstream_template_url.as_deref(),
            )),
        },
        FormatType::Native => {
            let markup = wire
                .markup
                .ok_or_else(|| anyhow!("Native bid {} has no markup", wire.request_id))?;

            let template = wire.native_template.as_ref().ok_or_else(|| {
                anyhow!(
                    "Native bid {} has no native declaration to shape against",
                    wire.request_id
                )
            })?;

            let response = parse_native_markup(&markup)
                .map_err(|e| anyhow!("Invalid native markup for {}: {}", wire.request_id, e))?;

            Creative::Native {
                native: to_legacy_response(&response, template),
                ad: Some(markup),
            }
        }
    };

    Ok(NormalizedBid {
        request_id: wire.request_id,
        cpm: wire.cpm,
        currency: wire
            .currency
            .filter(|cur| !cur.is_empty())
            .unwrap_or_else(|| settings.currency.clone()),
        width: wire.width,
        height: wire.height,
        creative_id: wire.creative_id,
        deal_id: wire.deal_id.filter(|deal| !deal.is_empty()),
        net_revenue: wire.net_revenue.unwrap_or(settings.net_revenue),
        ttl: wire.ttl.filter(|ttl| *ttl > 0).unwrap_or(settings.ttl),
        creative,
        meta: BidMeta {
            advertiser_domains: advertiser_domains(wire.advertiser_domains.as_ref()),
        },
    })
}

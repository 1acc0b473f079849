use crate::core::models::item::SizeList;
use crate::core::openrtb::native::{
    AssetRequest, DataRequest, ImageRequest, ImageRequestExt, NATIVE_VERSION, NativeRequest,
    NativeResponse, TitleRequest, event_method, event_type, image_type,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const DEFAULT_TITLE_LEN: u32 = 140;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<SizeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratios: Option<Vec<AspectRatio>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
}

/// Shorthand native asset declaration as written by publishers on the
/// ad unit. Only the asset keys become wire assets, the rest are
/// rendering hints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_targeting_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsored_by: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_url: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_link: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_icon: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body2: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<DataAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer_url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl NativeParams {
    /// Data assets in the order they are assigned wire ids
    fn data_assets(&self) -> [(NativeDataKind, Option<&DataAsset>); 12] {
        [
            (NativeDataKind::Sponsored, self.sponsored_by.as_ref()),
            (NativeDataKind::Desc, self.body.as_ref()),
            (NativeDataKind::CtaText, self.cta.as_ref()),
            (NativeDataKind::Rating, self.rating.as_ref()),
            (NativeDataKind::Likes, self.likes.as_ref()),
            (NativeDataKind::Downloads, self.downloads.as_ref()),
            (NativeDataKind::Price, self.price.as_ref()),
            (NativeDataKind::SalePrice, self.sale_price.as_ref()),
            (NativeDataKind::Phone, self.phone.as_ref()),
            (NativeDataKind::Address, self.address.as_ref()),
            (NativeDataKind::Body2, self.body2.as_ref()),
            (NativeDataKind::DisplayUrl, self.display_url.as_ref()),
        ]
    }
}

/// Native data asset types, discriminants are the ORTB type ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeDataKind {
    Sponsored = 1,
    Desc = 2,
    Rating = 3,
    Likes = 4,
    Downloads = 5,
    Price = 6,
    SalePrice = 7,
    Phone = 8,
    Address = 9,
    Body2 = 10,
    DisplayUrl = 11,
    CtaText = 12,
}

impl NativeDataKind {
    pub fn type_id(self) -> u8 {
        self as u8
    }

    pub fn from_type_id(type_id: u8) -> Option<Self> {
        let kind = match type_id {
            1 => NativeDataKind::Sponsored,
            2 => NativeDataKind::Desc,
            3 => NativeDataKind::Rating,
            4 => NativeDataKind::Likes,
            5 => NativeDataKind::Downloads,
            6 => NativeDataKind::Price,
            7 => NativeDataKind::SalePrice,
            8 => NativeDataKind::Phone,
            9 => NativeDataKind::Address,
            10 => NativeDataKind::Body2,
            11 => NativeDataKind::DisplayUrl,
            12 => NativeDataKind::CtaText,
            _ => return None,
        };

        Some(kind)
    }
}

fn required_flag(required: Option<bool>) -> Option<u8> {
    Some(required.map(u8::from).unwrap_or(0))
}

fn image_request(asset: &ImageAsset, kind: u8) -> ImageRequest {
    let mut img = ImageRequest {
        kind,
        ..Default::default()
    };

    match &asset.sizes {
        Some(SizeList::Single(size)) => {
            img.w = Some(size.w());
            img.h = Some(size.h());
        }
        Some(SizeList::Many(_)) => {
            warn!("Native image asset declares multiple sizes, only a single [w, h] is supported");
        }
        None => {}
    }

    if let Some(ratios) = asset.aspect_ratios.as_ref().filter(|r| !r.is_empty()) {
        let first = &ratios[0];
        if let (Some(min_width), Some(min_height)) = (first.min_width, first.min_height) {
            img.wmin = Some(min_width);
            img.hmin = Some(min_height);
        }

        let aspectratios: Vec<String> = ratios
            .iter()
            .filter_map(|r| match (r.ratio_width, r.ratio_height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => Some(format!("{}:{}", w, h)),
                _ => None,
            })
            .collect();

        if !aspectratios.is_empty() {
            img.ext = Some(ImageRequestExt { aspectratios });
        }
    }

    img
}

/// Expands a native declaration into an ORTB native request. Asset ids
/// are assigned sequentially in declaration order so the response can
/// be mapped back with the same request
pub fn to_ortb_native_request(params: &NativeParams) -> NativeRequest {
    let mut assets: Vec<AssetRequest> = Vec::new();

    if let Some(title) = &params.title {
        assets.push(AssetRequest {
            id: assets.len() as u32,
            required: required_flag(title.required),
            title: Some(TitleRequest {
                len: title.len.filter(|len| *len > 0).unwrap_or(DEFAULT_TITLE_LEN),
            }),
            ..Default::default()
        });
    }

    for (asset, kind) in [
        (&params.image, image_type::MAIN),
        (&params.icon, image_type::ICON),
    ] {
        if let Some(image) = asset {
            assets.push(AssetRequest {
                id: assets.len() as u32,
                required: required_flag(image.required),
                img: Some(image_request(image, kind)),
                ..Default::default()
            });
        }
    }

    for (kind, asset) in params.data_assets() {
        if let Some(data) = asset {
            assets.push(AssetRequest {
                id: assets.len() as u32,
                required: required_flag(data.required),
                data: Some(DataRequest {
                    kind: kind.type_id(),
                    len: data.len,
                }),
                ..Default::default()
            });
        }
    }

    if let Some(ext) = &params.ext {
        assets.push(AssetRequest {
            id: assets.len() as u32,
            ext: Some(ext.clone()),
            ..Default::default()
        });
    }

    for key in params.unknown.keys() {
        warn!("Unrecognized native asset code: {}, skipping", key);
    }

    NativeRequest {
        ver: NATIVE_VERSION.to_string(),
        assets,
        privacy: params.privacy_link.as_ref().map(|_| 1),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Flat native result shape expected by the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNativeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<NativeImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<NativeImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsored_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_link: Option<String>,
    #[serde(default)]
    pub impression_trackers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript_trackers: Option<String>,
}

impl LegacyNativeResponse {
    fn set_data(&mut self, kind: NativeDataKind, value: Option<String>) {
        let slot = match kind {
            NativeDataKind::Sponsored => &mut self.sponsored_by,
            NativeDataKind::Desc => &mut self.body,
            NativeDataKind::Rating => &mut self.rating,
            NativeDataKind::Likes => &mut self.likes,
            NativeDataKind::Downloads => &mut self.downloads,
            NativeDataKind::Price => &mut self.price,
            NativeDataKind::SalePrice => &mut self.sale_price,
            NativeDataKind::Phone => &mut self.phone,
            NativeDataKind::Address => &mut self.address,
            NativeDataKind::Body2 => &mut self.body2,
            NativeDataKind::DisplayUrl => &mut self.display_url,
            NativeDataKind::CtaText => &mut self.cta,
        };

        *slot = value;
    }
}

/// Reshapes an ORTB native response into the flat legacy result, using
/// the request that produced it to resolve what each asset id means
pub fn to_legacy_response(response: &NativeResponse, request: &NativeRequest) -> LegacyNativeResponse {
    let mut legacy = LegacyNativeResponse {
        click_url: response.link.as_ref().and_then(|link| link.url.clone()),
        privacy_link: response.privacy.clone(),
        ..Default::default()
    };

    for asset in response.assets.iter() {
        let requested = request.asset(asset.id);

        if let Some(title) = &asset.title {
            legacy.title = title.text.clone();
        } else if let Some(img) = &asset.img {
            let image = NativeImage {
                url: img.url.clone(),
                width: img.w,
                height: img.h,
            };

            let is_main = requested
                .and_then(|r| r.img.as_ref())
                .is_some_and(|r| r.kind == image_type::MAIN);

            if is_main {
                legacy.image = Some(image);
            } else {
                legacy.icon = Some(image);
            }
        } else if let Some(data) = &asset.data {
            let kind = requested
                .and_then(|r| r.data.as_ref())
                .and_then(|r| NativeDataKind::from_type_id(r.kind));

            match kind {
                Some(kind) => legacy.set_data(kind, data.value.clone()),
                None => debug!(
                    "Native data asset {} has no matching requested data asset, skipping",
                    asset.id
                ),
            }
        }
    }

    legacy
        .impression_trackers
        .extend(response.imptrackers.iter().cloned());

    let mut js_trackers = Vec::new();

    for tracker in response.eventtrackers.iter() {
        if tracker.event != event_type::IMPRESSION {
            continue;
        }

        let url = match &tracker.url {
            Some(url) => url,
            None => continue,
        };

        match tracker.method {
            event_method::IMG => legacy.impression_trackers.push(url.clone()),
            event_method::JS => js_trackers.push(format!("<script async src=\"{}\"></script>", url)),
            _ => {}
        }
    }

    if let Some(jstracker) = &response.jstracker {
        js_trackers.push(jstracker.clone());
    }

    if !js_trackers.is_empty() {
        legacy.javascript_trackers = Some(js_trackers.join("\n"));
    }

    legacy
}

/// Parses a native markup document, accepting both the bare native
/// object and the `{"native": {...}}` wrapper
pub fn parse_native_markup(markup: &str) -> Result<NativeResponse, serde_json::Error> {
    let mut doc: Value = serde_json::from_str(markup)?;

    if let Some(inner) = doc.get_mut("native").map(Value::take) {
        doc = inner;
    }

    serde_json::from_value(doc)
}

use crate::core::models::item::BidRequestItem;
use crate::core::openrtb::request::Format;
use crate::core::spec::media::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lookup key handed to a floor provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorQuery<'a> {
    pub currency: &'a str,
    pub media_type: MediaKind,
    pub size: Vec<Format>,
}

/// Providers are loose about the floor type, numeric strings are common
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloorAmount {
    Number(f64),
    Text(String),
}

impl FloorAmount {
    /// The floor as a finite number, if it is one
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            FloorAmount::Number(value) => *value,
            FloorAmount::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorInfo {
    pub currency: String,
    pub floor: FloorAmount,
}

/// Pluggable per item floor lookup, typically backed by a price floors module
pub trait FloorProvider: Send + Sync {
    fn get_floor(&self, query: &FloorQuery) -> Option<FloorInfo>;
}

impl<F> FloorProvider for F
where
    F: Fn(&FloorQuery) -> Option<FloorInfo> + Send + Sync,
{
    fn get_floor(&self, query: &FloorQuery) -> Option<FloorInfo> {
        self(query)
    }
}

/// Resolves the floor for an item. A non zero manual override always wins,
/// otherwise the provider floor is used when it is in the settlement
/// currency. Zero floors are treated as absent
pub fn resolve(item: &BidRequestItem, media_type: MediaKind, currency: &str) -> Option<f64> {
    if let Some(floor) = item.params.bidfloor.filter(|f| f.is_finite() && *f != 0.0) {
        return Some(floor);
    }

    let provider = item.floor_provider.as_ref()?;

    let query = FloorQuery {
        currency,
        media_type,
        size: item.sizes.iter().map(Format::from).collect(),
    };

    let info = provider.get_floor(&query)?;

    if info.currency != currency {
        debug!(
            "Ignoring floor for {} in {}, expected {}",
            item.bid_id, info.currency, currency
        );
        return None;
    }

    info.floor.value().filter(|floor| *floor != 0.0)
}

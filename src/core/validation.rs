use crate::core::models::item::BidRequestItem;
use crate::core::spec::media::VideoContext;
use thiserror::Error;
use tracing::debug;

/// Reasons an item is rejected before translation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing or empty zoneId")]
    MissingZoneId,

    #[error("Unsupported video context: {0:?}")]
    InvalidVideoContext(Option<String>),
}

/// Checks an item can be sent to the endpoint. Video items need an
/// instream or outstream context, bidder params override the ad unit's
pub fn validate(item: &BidRequestItem) -> Result<(), ValidationError> {
    if !item.params.zone_id.as_ref().is_some_and(|zone| zone.is_set()) {
        return Err(ValidationError::MissingZoneId);
    }

    if item.media_types.video.is_some() {
        let context = item.video_context();

        if context.and_then(|c| c.parse::<VideoContext>().ok()).is_none() {
            return Err(ValidationError::InvalidVideoContext(
                context.map(str::to_string),
            ));
        }
    }

    Ok(())
}

pub fn is_bid_request_valid(item: &BidRequestItem) -> bool {
    match validate(item) {
        Ok(()) => true,
        Err(e) => {
            debug!("Rejecting bid request {}: {}", item.bid_id, e);
            false
        }
    }
}

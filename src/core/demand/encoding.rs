use crate::core::demand::interpret::{WireBid, shape};
use crate::core::models::bid::NormalizedBid;
use crate::core::models::bidder::Encoding;
use crate::core::models::context::BatchContext;
use crate::core::models::item::BidRequestItem;
use crate::core::models::message::{HttpMethod, OutboundMessage};
use crate::core::spec::media::MediaKind;
use bytes::Bytes;
use tracing::{debug, debug_span, error};

/// Items grouped under one media classification, sent as one message
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub kind: MediaKind,
    pub items: Vec<&'a BidRequestItem>,
}

/// Order partitions are emitted in
const PARTITION_ORDER: [MediaKind; 3] = [MediaKind::Video, MediaKind::Native, MediaKind::Banner];

/// Splits a batch into single item partitions, all video first, then
/// native, then banner. Relative item order is kept within each kind
pub fn partition(items: &[BidRequestItem]) -> Vec<Partition<'_>> {
    PARTITION_ORDER
        .into_iter()
        .flat_map(|kind| {
            items
                .iter()
                .filter(move |item| item.classify() == kind)
                .map(move |item| Partition {
                    kind,
                    items: vec![item],
                })
        })
        .collect()
}

/// Values the codecs fall back on when the endpoint omits them
#[derive(Debug, Clone, PartialEq)]
pub struct CodecSettings {
    /// Settlement currency
    pub currency: String,
    pub ttl: u32,
    pub net_revenue: bool,
    /// Reported to the endpoint as the integration version
    pub integration_version: String,
}

/// One wire encoding of the endpoint
pub trait DemandCodec: Send + Sync {
    fn encoding(&self) -> Encoding;

    fn settings(&self) -> &CodecSettings;

    /// Serializes the payload for a single partition
    fn encode(&self, partition: &Partition, batch: &BatchContext) -> Result<String, anyhow::Error>;

    /// Reduces a raw response to wire bids, linked to the items of the
    /// originating message
    fn decode(&self, body: &Bytes, message: &OutboundMessage) -> Result<Vec<WireBid>, anyhow::Error>;
}

pub struct RequestEncoder;

impl RequestEncoder {
    /// Builds one outbound message per partition. An item that fails to
    /// encode is logged and dropped, the rest of the batch still goes out
    pub fn encode(
        codec: &dyn DemandCodec,
        url: &str,
        items: &[BidRequestItem],
        batch: &BatchContext,
    ) -> Vec<OutboundMessage> {
        let mut messages = Vec::new();

        for partition in partition(items) {
            let span = debug_span!(
                "encode_partition",
                encoding = %codec.encoding(),
                media = %partition.kind
            );
            let _guard = span.enter();

            let bid_ids: Vec<String> = partition
                .items
                .iter()
                .map(|item| item.bid_id.clone())
                .collect();

            match codec.encode(&partition, batch) {
                Ok(data) => {
                    debug!("Encoded {} item(s) for {:?}", bid_ids.len(), bid_ids);
                    messages.push(OutboundMessage {
                        method: HttpMethod::Post,
                        url: url.to_string(),
                        data,
                        encoding: codec.encoding(),
                        media_kind: partition.kind,
                        bid_ids,
                    });
                }
                Err(e) => error!("Failed encoding bid request(s) {:?}, dropping: {}", bid_ids, e),
            }
        }

        messages
    }
}

pub struct ResponseDecoder;

impl ResponseDecoder {
    fn try_decode(
        codec: &dyn DemandCodec,
        body: &Bytes,
        message: &OutboundMessage,
    ) -> Result<Vec<NormalizedBid>, anyhow::Error> {
        codec
            .decode(body, message)?
            .into_iter()
            .map(|wire| shape(wire, codec.settings()))
            .collect()
    }

    /// Decodes and shapes a raw response. Any failure empties the whole
    /// result, it is logged and never propagated
    pub fn decode(
        codec: &dyn DemandCodec,
        body: &Bytes,
        message: &OutboundMessage,
    ) -> Vec<NormalizedBid> {
        let span = debug_span!(
            "decode_response",
            encoding = %codec.encoding(),
            media = %message.media_kind
        );
        let _guard = span.enter();

        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty response body, no bids");
            return Vec::new();
        }

        match Self::try_decode(codec, body, message) {
            Ok(bids) => bids,
            Err(e) => {
                error!(
                    "Error while parsing response for {:?}: {}",
                    message.bid_ids, e
                );
                Vec::new()
            }
        }
    }
}

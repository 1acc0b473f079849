use crate::app::config::AdapterConfig;
use crate::core::demand::{
    DemandCodec, LegacyCodec, OrtbCodec, RequestEncoder, ResponseDecoder,
};
use crate::core::models::bid::NormalizedBid;
use crate::core::models::bidder::Encoding;
use crate::core::models::context::{BatchContext, GdprConsent};
use crate::core::models::item::BidRequestItem;
use crate::core::models::message::OutboundMessage;
use crate::core::models::sync::{SyncOptions, UserSync};
use crate::core::spec::bidder::{self, ALIASES, BIDDER_CODE, GVL_ID, SUPPORTED_MEDIA_TYPES};
use crate::core::spec::media::MediaKind;
use crate::core::{usersync, validation};
use bytes::Bytes;
use tracing::{debug, debug_span};

/// Two way translation between orchestrator bid items and the
/// endpoint's wire formats. Holds only immutable configuration
pub struct SmileWantedAdapter {
    config: AdapterConfig,
    ortb: OrtbCodec,
    legacy: LegacyCodec,
}

impl SmileWantedAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        let settings = config.codec_settings();

        Self {
            ortb: OrtbCodec::new(settings.clone()),
            legacy: LegacyCodec::new(settings),
            config,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    pub fn gvl_id(&self) -> u32 {
        GVL_ID
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        &ALIASES
    }

    pub fn media_types(&self) -> &'static [MediaKind] {
        &SUPPORTED_MEDIA_TYPES
    }

    /// True if bids addressed to `code` belong to this adapter
    pub fn handles(&self, code: &str) -> bool {
        bidder::is_bidder_code(code)
    }

    fn codec(&self, encoding: Encoding) -> &dyn DemandCodec {
        match encoding {
            Encoding::Ortb => &self.ortb,
            Encoding::Legacy => &self.legacy,
        }
    }

    pub fn is_bid_request_valid(&self, item: &BidRequestItem) -> bool {
        validation::is_bid_request_valid(item)
    }

    /// Builds one outbound message per item, video first, then native,
    /// then banner
    pub fn translate(
        &self,
        items: &[BidRequestItem],
        batch: &BatchContext,
        encoding: Encoding,
    ) -> Vec<OutboundMessage> {
        let span = debug_span!("translate", bidder = BIDDER_CODE, encoding = %encoding);
        let _guard = span.enter();

        let messages =
            RequestEncoder::encode(self.codec(encoding), &self.config.endpoint.url, items, batch);

        debug!(
            "Translated {} item(s) into {} message(s)",
            items.len(),
            messages.len()
        );

        messages
    }

    pub fn build_ortb_requests(
        &self,
        items: &[BidRequestItem],
        batch: &BatchContext,
    ) -> Vec<OutboundMessage> {
        self.translate(items, batch, Encoding::Ortb)
    }

    pub fn build_requests(
        &self,
        items: &[BidRequestItem],
        batch: &BatchContext,
    ) -> Vec<OutboundMessage> {
        self.translate(items, batch, Encoding::Legacy)
    }

    /// Translates with the configured encoding
    pub fn build(&self, items: &[BidRequestItem], batch: &BatchContext) -> Vec<OutboundMessage> {
        self.translate(items, batch, self.config.endpoint.encoding)
    }

    pub fn interpret_ortb_response(
        &self,
        body: &Bytes,
        message: &OutboundMessage,
    ) -> Vec<NormalizedBid> {
        ResponseDecoder::decode(&self.ortb, body, message)
    }

    pub fn interpret_response(
        &self,
        body: &Bytes,
        message: &OutboundMessage,
    ) -> Vec<NormalizedBid> {
        ResponseDecoder::decode(&self.legacy, body, message)
    }

    /// Interprets the raw response with the encoding the message was sent in
    pub fn interpret(&self, body: &Bytes, message: &OutboundMessage) -> Vec<NormalizedBid> {
        let span = debug_span!("interpret", bidder = BIDDER_CODE, encoding = %message.encoding);
        let _guard = span.enter();

        ResponseDecoder::decode(self.codec(message.encoding), body, message)
    }

    pub fn user_syncs(
        &self,
        options: &SyncOptions,
        consent: Option<&GdprConsent>,
        us_privacy: Option<&str>,
    ) -> Vec<UserSync> {
        usersync::user_syncs(&self.config.endpoint.sync_url, options, consent, us_privacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::floors::{FloorAmount, FloorInfo, FloorProvider, FloorQuery};
    use crate::core::models::message::HttpMethod;
    use crate::core::models::sync::SyncKind;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const CONSENT: &str = "BOO_ch7OO_ch7AKABBENA2-AAAAZ97_______9______9uz_Gv_r_f__33e8_39v_h_7_u___m_-zzV4-_lvQV1yPA1OrfArgFA";

    fn adapter() -> SmileWantedAdapter {
        SmileWantedAdapter::new(AdapterConfig::default())
    }

    fn display_request() -> Value {
        json!({
            "adUnitCode": "sw_300x250",
            "bidId": "12345",
            "timeout": 1000,
            "sizes": [[300, 250], [300, 200]],
            "mediaTypes": { "banner": { "sizes": [[300, 250], [300, 200]] } },
            "params": { "zoneId": 1 },
            "transactionId": "trans_abcd1234"
        })
    }

    fn video_instream_request() -> Value {
        json!({
            "adUnitCode": "sw_instream_video_640x480",
            "bidId": "12345",
            "timeout": 1000,
            "sizes": [[640, 480]],
            "mediaTypes": {
                "video": {
                    "context": "instream",
                    "mimes": ["video/mp4"],
                    "minduration": 0,
                    "maxduration": 120,
                    "protocols": [1, 2, 3, 4, 5, 6, 7, 8],
                    "startdelay": 0,
                    "placement": 1,
                    "skip": 1,
                    "skipafter": 10,
                    "minbitrate": 10,
                    "maxbitrate": 10,
                    "delivery": [1],
                    "playbackmethod": [2],
                    "api": [1, 2],
                    "linearity": 1,
                    "playerSize": [640, 480]
                }
            },
            "params": { "zoneId": 2, "bidfloor": 2.5 }
        })
    }

    fn video_outstream_request() -> Value {
        json!({
            "adUnitCode": "sw_outstream_video_640x480",
            "bidId": "12345",
            "sizes": [[640, 480]],
            "mediaTypes": {
                "video": { "context": "outstream", "placement": 3, "playerSize": [640, 480] }
            },
            "params": { "zoneId": 3, "bidfloor": 2.5 }
        })
    }

    fn native_request() -> Value {
        json!({
            "adUnitCode": "sw_native_300x250",
            "bidId": "12345",
            "sizes": [[300, 250]],
            "mediaTypes": {
                "native": {
                    "sendTargetingKeys": false,
                    "title": { "required": true, "len": 140 },
                    "image": { "required": true, "sizes": [300, 250] },
                    "icon": { "required": false, "sizes": [50, 50] },
                    "sponsoredBy": { "required": true },
                    "body": { "required": true },
                    "clickUrl": { "required": false },
                    "privacyLink": { "required": false },
                    "cta": { "required": false },
                    "rating": { "required": false },
                    "likes": { "required": false },
                    "downloads": { "required": false },
                    "price": { "required": false },
                    "salePrice": { "required": false },
                    "phone": { "required": false },
                    "address": { "required": false },
                    "desc2": { "required": false },
                    "displayUrl": { "required": false }
                }
            },
            "params": { "zoneId": 4 }
        })
    }

    fn items(value: Value) -> Vec<BidRequestItem> {
        vec![serde_json::from_value(value).unwrap()]
    }

    fn batch() -> BatchContext {
        serde_json::from_value(json!({
            "ortb2": {
                "source": { "tid": "tid000" },
                "site": { "mobile": 0, "page": "http://test.com" },
                "device": { "w": 1920, "h": 1080, "dnt": 0, "ua": "Mozilla/5.0" }
            }
        }))
        .unwrap()
    }

    fn ortb_payload(items: &[BidRequestItem], batch: &BatchContext) -> Value {
        let messages = adapter().build_ortb_requests(items, batch);
        assert_eq!(messages.len(), 1);
        serde_json::from_str(&messages[0].data).unwrap()
    }

    #[test]
    fn test_display_request() {
        let messages = adapter().build_ortb_requests(&items(display_request()), &batch());
        assert_eq!(messages[0].method, HttpMethod::Post);
        assert_eq!(messages[0].url, "https://prebid.smilewanted.com");
        assert_eq!(messages[0].bid_ids, vec!["12345".to_string()]);

        let request: Value = serde_json::from_str(&messages[0].data).unwrap();

        assert!(request["id"].is_string());
        assert_eq!(request["tmax"], json!(1000));

        let imp = &request["imp"][0];
        assert_eq!(request["imp"].as_array().unwrap().len(), 1);
        assert_eq!(imp["id"], json!("12345"));
        assert_eq!(imp["tagid"], json!("sw_300x250"));
        assert_eq!(imp["bidfloorcur"], json!("EUR"));
        assert!(imp.get("bidfloor").is_none());
        assert_eq!(
            imp["banner"]["format"],
            json!([{ "w": 300, "h": 250 }, { "w": 300, "h": 200 }])
        );
        assert!(imp.get("video").is_none());
        assert!(imp.get("native").is_none());
        assert_eq!(imp["ext"]["bidder"]["zoneId"], json!(1));
        assert_eq!(imp["ext"]["tid"], json!("trans_abcd1234"));

        assert_eq!(request["device"]["w"], json!(1920));
        assert_eq!(request["device"]["h"], json!(1080));
        assert_eq!(request["device"]["dnt"], json!(0));
        assert_eq!(request["device"]["ua"], json!("Mozilla/5.0"));
        assert_eq!(request["source"]["tid"], json!("tid000"));
        assert_eq!(request["site"]["mobile"], json!(0));
        assert_eq!(request["site"]["page"], json!("http://test.com"));
        assert!(request.get("user").is_none());
        assert!(request["ext"].get("positionType").is_none());
        assert_eq!(
            request["ext"]["prebidVersion"],
            json!(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_request_with_referer() {
        let mut batch = batch();
        batch.referer_info = serde_json::from_value(json!({
            "page": "https://localhost/Prebid.js/integrationExamples/gpt/hello_world.html"
        }))
        .ok();
        if let Some(site) = batch.ortb2.as_mut().and_then(|fpd| fpd.site.as_mut()) {
            site.page = None;
        }

        let request = ortb_payload(&items(display_request()), &batch);

        assert_eq!(
            request["site"]["page"],
            json!("https://localhost/Prebid.js/integrationExamples/gpt/hello_world.html")
        );
    }

    #[test]
    fn test_request_with_eids() {
        let mut item = display_request();
        item["userIdAsEids"] = json!([
            { "source": "pubcid.org", "uids": [{ "id": "some-random-id-value-1", "atype": 1 }] },
            {
                "source": "adserver.org",
                "uids": [{ "id": "some-random-id-value-2", "atype": 1, "ext": { "rtiPartner": "TDID" } }]
            }
        ]);

        let request = ortb_payload(&items(item), &batch());
        let eids = &request["user"]["ext"]["eids"];

        assert_eq!(eids.as_array().unwrap().len(), 2);
        assert_eq!(eids[0]["source"], json!("pubcid.org"));
        assert_eq!(eids[0]["uids"][0]["atype"], json!(1));
        assert_eq!(eids[0]["uids"][0]["id"], json!("some-random-id-value-1"));
        assert_eq!(eids[1]["source"], json!("adserver.org"));
        assert_eq!(eids[1]["uids"][0]["ext"]["rtiPartner"], json!("TDID"));
    }

    #[test]
    fn test_request_with_schain() {
        let mut item = display_request();
        item["schain"] = json!({
            "ver": "1.0",
            "complete": 1,
            "nodes": [
                {
                    "asi": "exchange1.com",
                    "sid": "1234",
                    "hp": 1,
                    "rid": "bid-request-1",
                    "name": "publisher",
                    "domain": "publisher.com"
                },
                {
                    "asi": "exchange2.com",
                    "sid": "abcd",
                    "hp": 1,
                    "rid": "bid-request-2",
                    "name": "intermediary",
                    "domain": "intermediary.com"
                }
            ]
        });

        let request = ortb_payload(&items(item), &batch());
        let schain = &request["source"]["ext"]["schain"];

        assert_eq!(schain["complete"], json!(1));
        assert_eq!(schain["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(
            schain["nodes"][0],
            json!({
                "asi": "exchange1.com",
                "sid": "1234",
                "hp": 1,
                "rid": "bid-request-1",
                "name": "publisher",
                "domain": "publisher.com"
            })
        );
        assert_eq!(schain["nodes"][1]["sid"], json!("abcd"));
        assert_eq!(request["source"]["tid"], json!("tid000"));
    }

    #[test]
    fn test_request_with_position_type() {
        let mut item = display_request();
        item["params"]["positionType"] = json!("infeed");

        let request = ortb_payload(&items(item), &batch());

        assert_eq!(request["ext"]["positionType"], json!("infeed"));
    }

    #[test]
    fn test_video_instream_request() {
        let request = ortb_payload(&items(video_instream_request()), &batch());
        let imp = &request["imp"][0];
        let video = &imp["video"];

        assert!(imp.get("banner").is_none());
        assert!(imp.get("native").is_none());
        assert_eq!(imp["bidfloor"], json!(2.5));
        assert_eq!(imp["tagid"], json!("sw_instream_video_640x480"));
        assert_eq!(video["ext"]["context"], json!("instream"));
        assert_eq!(video["mimes"], json!(["video/mp4"]));
        assert_eq!(video["minduration"], json!(0));
        assert_eq!(video["maxduration"], json!(120));
        assert_eq!(video["protocols"], json!([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(video["startdelay"], json!(0));
        assert_eq!(video["placement"], json!(1));
        assert_eq!(video["skip"], json!(1));
        assert_eq!(video["skipafter"], json!(10));
        assert_eq!(video["minbitrate"], json!(10));
        assert_eq!(video["maxbitrate"], json!(10));
        assert_eq!(video["delivery"], json!([1]));
        assert_eq!(video["playbackmethod"], json!([2]));
        assert_eq!(video["api"], json!([1, 2]));
        assert_eq!(video["linearity"], json!(1));
        assert_eq!(video["w"], json!(640));
        assert_eq!(video["h"], json!(480));
    }

    #[test]
    fn test_video_outstream_request() {
        let request = ortb_payload(&items(video_outstream_request()), &batch());
        let imp = &request["imp"][0];

        assert!(imp.get("banner").is_none());
        assert_eq!(imp["bidfloor"], json!(2.5));
        assert_eq!(imp["tagid"], json!("sw_outstream_video_640x480"));
        assert_eq!(imp["ext"]["bidder"]["zoneId"], json!(3));
        assert_eq!(imp["video"]["ext"]["context"], json!("outstream"));
        assert_eq!(imp["video"]["placement"], json!(3));
        assert_eq!(imp["video"]["w"], json!(640));
        assert_eq!(imp["video"]["h"], json!(480));
    }

    #[test]
    fn test_native_request() {
        let request = ortb_payload(&items(native_request()), &batch());
        let imp = &request["imp"][0];

        assert!(imp.get("banner").is_none());
        assert!(imp.get("video").is_none());
        assert_eq!(imp["tagid"], json!("sw_native_300x250"));
        assert_eq!(imp["ext"]["bidder"]["zoneId"], json!(4));
        assert_eq!(
            imp["native"]["request"],
            json!(
                r#"{"ver":"1.2","assets":[{"id":0,"required":1,"title":{"len":140}},{"id":1,"required":1,"img":{"type":3,"w":300,"h":250}},{"id":2,"required":0,"img":{"type":1,"w":50,"h":50}},{"id":3,"required":1,"data":{"type":1}},{"id":4,"required":1,"data":{"type":2}},{"id":5,"required":0,"data":{"type":12}},{"id":6,"required":0,"data":{"type":3}},{"id":7,"required":0,"data":{"type":4}},{"id":8,"required":0,"data":{"type":5}},{"id":9,"required":0,"data":{"type":6}},{"id":10,"required":0,"data":{"type":7}},{"id":11,"required":0,"data":{"type":8}},{"id":12,"required":0,"data":{"type":9}},{"id":13,"required":0,"data":{"type":11}}],"privacy":1}"#
            )
        );
        assert_eq!(imp["native"]["ver"], json!("1.2"));
    }

    #[test]
    fn test_request_with_gdpr() {
        let batch: BatchContext = serde_json::from_value(json!({
            "gdprConsent": { "consentString": CONSENT, "gdprApplies": true }
        }))
        .unwrap();

        let request = ortb_payload(&items(display_request()), &batch);

        assert_eq!(request["regs"]["ext"]["gdpr"], json!(true));
        assert_eq!(request["user"]["ext"]["consent"], json!(CONSENT));
    }

    #[test]
    fn test_request_with_gdpr_without_applies() {
        let batch: BatchContext = serde_json::from_value(json!({
            "gdprConsent": { "consentString": CONSENT }
        }))
        .unwrap();

        let request = ortb_payload(&items(display_request()), &batch);

        assert!(request.get("regs").is_none());
        assert_eq!(request["user"]["ext"]["consent"], json!(CONSENT));
    }

    #[test]
    fn test_floor_override_beats_provider() {
        let provider: Arc<dyn FloorProvider> = Arc::new(|_: &FloorQuery| -> Option<FloorInfo> {
            Some(FloorInfo {
                currency: "EUR".into(),
                floor: FloorAmount::Number(0.8),
            })
        });

        let mut video = items(video_instream_request());
        video[0].floor_provider = Some(provider.clone());
        let request = ortb_payload(&video, &batch());
        assert_eq!(request["imp"][0]["bidfloor"], json!(2.5));

        let mut display = items(display_request());
        display[0].floor_provider = Some(provider);
        let request = ortb_payload(&display, &batch());
        assert_eq!(request["imp"][0]["bidfloor"], json!(0.8));
    }

    #[test]
    fn test_partition_membership() {
        let mut batch_items: Vec<BidRequestItem> = Vec::new();
        batch_items.extend(items(display_request()));
        batch_items.extend(items(native_request()));
        batch_items.extend(items(video_outstream_request()));
        batch_items[1].bid_id = "native".into();
        batch_items[2].bid_id = "video".into();

        let messages = adapter().build_ortb_requests(&batch_items, &batch());

        let kinds: Vec<MediaKind> = messages.iter().map(|m| m.media_kind).collect();
        assert_eq!(
            kinds,
            vec![MediaKind::Video, MediaKind::Native, MediaKind::Banner]
        );

        let ids: Vec<&str> = messages.iter().map(|m| m.bid_ids[0].as_str()).collect();
        assert_eq!(ids, vec!["video", "native", "12345"]);
    }

    #[test]
    fn test_legacy_build_uses_configured_encoding() {
        let mut config = AdapterConfig::default();
        config.endpoint.encoding = Encoding::Legacy;
        let adapter = SmileWantedAdapter::new(config);

        let messages = adapter.build(&items(display_request()), &batch());

        assert_eq!(messages[0].encoding, Encoding::Legacy);
        let payload: Value = serde_json::from_str(&messages[0].data).unwrap();
        assert_eq!(payload["bidId"], json!("12345"));
        assert_eq!(payload["tagId"], json!("sw_300x250"));
    }

    fn legacy_bids(request: Value, response: Value) -> Vec<NormalizedBid> {
        let adapter = adapter();
        let messages = adapter.build_requests(&items(request), &BatchContext::default());

        adapter.interpret(&Bytes::from(response.to_string()), &messages[0])
    }

    #[test]
    fn test_parse_display() {
        let bids = legacy_bids(
            display_request(),
            json!({
                "cpm": 3,
                "width": 300,
                "height": 250,
                "creativeId": "crea_sw_1",
                "currency": "EUR",
                "isNetCpm": true,
                "ttl": 300,
                "ad": "< --- sw script --- >",
                "cSyncUrl": "https://csync.smilewanted.com"
            }),
        );

        assert_eq!(bids.len(), 1);
        let bid = &bids[0];
        assert_eq!(bid.cpm, 3.0);
        assert_eq!(bid.ad(), Some("< --- sw script --- >"));
        assert_eq!(bid.width, 300);
        assert_eq!(bid.height, 250);
        assert_eq!(bid.creative_id, "crea_sw_1");
        assert_eq!(bid.currency, "EUR");
        assert!(bid.net_revenue);
        assert_eq!(bid.ttl, 300);
        assert_eq!(bid.request_id, "12345");
    }

    #[test]
    fn test_parse_invalid_message_data() {
        let messages = adapter().build_requests(&items(display_request()), &BatchContext::default());
        let mut message = messages[0].clone();
        message.data = "invalid Json".into();

        let body = Bytes::from(r#"{"cpm":3,"width":300,"height":250,"ad":"<markup>"}"#);

        assert!(adapter().interpret_response(&body, &message).is_empty());
        assert!(adapter().interpret_response(&Bytes::from("{not json"), &message).is_empty());
        assert!(adapter().interpret_response(&Bytes::new(), &message).is_empty());
    }

    #[test]
    fn test_parse_video_instream() {
        let bids = legacy_bids(
            video_instream_request(),
            json!({
                "cpm": 3,
                "width": 640,
                "height": 480,
                "creativeId": "crea_sw_2",
                "currency": "EUR",
                "isNetCpm": true,
                "ttl": 300,
                "ad": "https://vast.smilewanted.com",
                "formatTypeSw": "video_instream"
            }),
        );

        let bid = &bids[0];
        assert_eq!(bid.ad(), None);
        assert_eq!(bid.vast_url(), Some("https://vast.smilewanted.com"));
        assert_eq!(bid.width, 640);
        assert_eq!(bid.creative_id, "crea_sw_2");
        assert!(bid.renderer().is_none());
    }

    #[test]
    fn test_parse_video_outstream() {
        let bids = legacy_bids(
            video_outstream_request(),
            json!({
                "cpm": 3,
                "width": 640,
                "height": 480,
                "creativeId": "crea_sw_3",
                "currency": "EUR",
                "isNetCpm": true,
                "ttl": 300,
                "ad": "https://vast.smilewanted.com",
                "OustreamTemplateUrl": "https://prebid.smilewanted.com/scripts_outstream/infeed.js",
                "formatTypeSw": "video_outstream"
            }),
        );

        let bid = &bids[0];
        assert_eq!(bid.ad(), None);
        assert_eq!(bid.vast_url(), Some("https://vast.smilewanted.com"));
        assert_eq!(
            bid.renderer().map(|r| r.url.as_str()),
            Some("https://prebid.smilewanted.com/scripts_outstream/infeed.js")
        );
        assert_eq!(bid.renderer().map(|r| r.id.as_str()), Some("12345"));
        assert_eq!(bid.creative_id, "crea_sw_3");
    }

    #[test]
    fn test_parse_native() {
        let markup = r#"{"link":{"url":"https://www.smilewanted.com"},"assets":[{"id":0,"required":1,"title":{"len":50}},{"id":1,"required":1,"img":{"type":3,"w":150,"h":50,"ext":{"aspectratios":["2:1"]}}},{"id":2,"required":0,"img":{"type":1,"w":50,"h":50,"ext":{"aspectratios":["2:1"]}}},{"id":3,"required":1,"data":{"type":1,"value":"Smilewanted sponsor"}},{"id":4,"required":1,"data":{"type":2,"value":"Smilewanted Description"}}]}"#;

        let bids = legacy_bids(
            native_request(),
            json!({
                "cpm": 3,
                "width": 300,
                "height": 250,
                "creativeId": "crea_sw_1",
                "currency": "EUR",
                "isNetCpm": true,
                "ttl": 300,
                "ad": markup,
                "formatTypeSw": "native"
            }),
        );

        let bid = &bids[0];
        assert_eq!(bid.ad(), Some(markup));
        assert_eq!(bid.width, 300);
        assert_eq!(bid.request_id, "12345");

        let native = bid.native().unwrap();
        assert_eq!(native.click_url.as_deref(), Some("https://www.smilewanted.com"));
        assert_eq!(native.sponsored_by.as_deref(), Some("Smilewanted sponsor"));
        assert_eq!(native.body.as_deref(), Some("Smilewanted Description"));
        assert_eq!(native.image.as_ref().and_then(|i| i.width), Some(150));
        assert_eq!(native.icon.as_ref().and_then(|i| i.height), Some(50));
        assert_eq!(native.title, None);
    }

    #[test]
    fn test_parse_ortb_display() {
        let adapter = adapter();
        let messages = adapter.build_ortb_requests(&items(display_request()), &batch());

        let body = Bytes::from(
            json!({
                "id": "b0d257b7-4a4e-4bf4-af33-6ac6e17f618a",
                "bidid": "123",
                "cur": "EUR",
                "seatbid": [{
                    "bid": [{
                        "id": "d7ab25ca-f837-49ee-883b-f98c27840e4f",
                        "impid": "12345",
                        "price": 15,
                        "adid": "123",
                        "adm": "< --- sw script --- >",
                        "adomain": ["test838.com"],
                        "cid": "123",
                        "crid": "crid4",
                        "h": 250,
                        "w": 300
                    }],
                    "seat": "123"
                }]
            })
            .to_string(),
        );

        let bids = adapter.interpret_ortb_response(&body, &messages[0]);

        assert_eq!(bids.len(), 1);
        let bid = &bids[0];
        assert_eq!(bid.cpm, 15.0);
        assert_eq!(bid.ad(), Some("< --- sw script --- >"));
        assert_eq!(bid.width, 300);
        assert_eq!(bid.height, 250);
        assert_eq!(bid.creative_id, "crid4");
        assert_eq!(bid.currency, "EUR");
        assert!(bid.net_revenue);
        assert_eq!(bid.ttl, 300);
        assert_eq!(bid.request_id, "12345");
        assert_eq!(
            bid.meta.advertiser_domains,
            Some(vec!["test838.com".to_string()])
        );
    }

    #[test]
    fn test_parse_ortb_native() {
        let adapter = adapter();
        let messages = adapter.build_ortb_requests(&items(native_request()), &batch());

        let markup = json!({
            "assets": [
                { "id": 0, "title": { "text": "Title" } },
                { "id": 3, "data": { "value": "Sponsor" } },
                { "id": 5, "data": { "value": "Install" } }
            ]
        })
        .to_string();

        let body = Bytes::from(
            json!({
                "id": "r",
                "seatbid": [{
                    "bid": [{
                        "id": "1",
                        "impid": "12345",
                        "price": 10,
                        "adm": markup,
                        "crid": "crid3",
                        "w": 300,
                        "h": 250,
                        "ext": { "smilewanted": { "formatTypeSw": "native" } }
                    }]
                }]
            })
            .to_string(),
        );

        let bids = adapter.interpret(&body, &messages[0]);
        let native = bids[0].native().unwrap();

        assert_eq!(native.title.as_deref(), Some("Title"));
        assert_eq!(native.sponsored_by.as_deref(), Some("Sponsor"));
        assert_eq!(native.cta.as_deref(), Some("Install"));
    }

    #[test]
    fn test_parse_ortb_outstream_template() {
        let adapter = adapter();
        let messages = adapter.build_ortb_requests(&items(video_outstream_request()), &batch());

        let body = Bytes::from(
            json!({
                "id": "r",
                "seatbid": [{
                    "bid": [{
                        "id": "1",
                        "impid": "12345",
                        "price": 10,
                        "adm": "https://vast.smilewanted.com",
                        "crid": "crid3",
                        "ext": {
                            "smilewanted": {
                                "formatTypeSw": "video_outstream",
                                "OustreamTemplateUrl": "https://prebid.smilewanted.com/scripts_outstream/infeed.js"
                            }
                        }
                    }]
                }]
            })
            .to_string(),
        );

        let bids = adapter.interpret(&body, &messages[0]);
        let bid = &bids[0];

        assert_eq!(bid.vast_url(), Some("https://vast.smilewanted.com"));
        assert_eq!(bid.width, 640);
        assert_eq!(bid.height, 480);
        assert_eq!(
            bid.renderer().map(|r| r.url.as_str()),
            Some("https://prebid.smilewanted.com/scripts_outstream/infeed.js")
        );
    }

    #[test]
    fn test_user_syncs() {
        let adapter = adapter();
        let iframe = SyncOptions {
            iframe_enabled: true,
            pixel_enabled: false,
        };

        let syncs = adapter.user_syncs(&iframe, None, None);
        assert_eq!(syncs.len(), 1);
        assert_eq!(syncs[0].kind, SyncKind::Iframe);
        assert_eq!(syncs[0].url, "https://csync.smilewanted.com");

        let consent = GdprConsent {
            consent_string: Some("foo".into()),
            gdpr_applies: None,
        };
        let syncs = adapter.user_syncs(&iframe, Some(&consent), Some("1NYN"));
        assert_eq!(
            syncs[0].url,
            "https://csync.smilewanted.com?gdpr_consent=foo&us_privacy=1NYN"
        );

        assert!(adapter.user_syncs(&SyncOptions::default(), None, None).is_empty());
    }

    #[test]
    fn test_identity() {
        let adapter = adapter();

        assert_eq!(adapter.code(), "smilewanted");
        assert_eq!(adapter.gvl_id(), 639);
        assert_eq!(adapter.aliases(), &["smile", "sw"]);
        assert!(adapter.media_types().contains(&MediaKind::Video));
        assert!(adapter.handles("sw"));
        assert!(!adapter.handles("rubicon"));
    }

    #[test]
    fn test_validation() {
        let adapter = adapter();

        assert!(adapter.is_bid_request_valid(&items(display_request())[0]));
        assert!(adapter.is_bid_request_valid(&items(video_instream_request())[0]));

        let mut invalid_video = video_instream_request();
        invalid_video["mediaTypes"] = json!({ "video": {} });
        assert!(!adapter.is_bid_request_valid(&items(invalid_video)[0]));

        let mut no_zone = display_request();
        no_zone["params"] = json!({});
        assert!(!adapter.is_bid_request_valid(&items(no_zone)[0]));
    }
}

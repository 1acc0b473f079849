use crate::core::models::context::GdprConsent;
use crate::core::models::sync::{SyncKind, SyncOptions, UserSync};
use tracing::debug;
use url::form_urlencoded;

/// Builds the sync url query from the consent signals. The applicability
/// flag is only sent alongside a consent string
pub fn build_sync_query(consent: Option<&GdprConsent>, us_privacy: Option<&str>) -> Option<String> {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;

    if let Some(consent_string) = consent.and_then(|c| c.consent_string.as_deref()) {
        if let Some(applies) = consent.and_then(|c| c.gdpr_applies) {
            query.append_pair("gdpr", if applies { "1" } else { "0" });
        }
        query.append_pair("gdpr_consent", consent_string);
        empty = false;
    }

    if let Some(us_privacy) = us_privacy.filter(|usp| !usp.is_empty()) {
        query.append_pair("us_privacy", us_privacy);
        empty = false;
    }

    (!empty).then(|| query.finish())
}

/// Iframe sync pixels to drop after the auction, none unless the page
/// allows iframe syncing
pub fn user_syncs(
    sync_url: &str,
    options: &SyncOptions,
    consent: Option<&GdprConsent>,
    us_privacy: Option<&str>,
) -> Vec<UserSync> {
    if !options.iframe_enabled {
        debug!("Iframe syncing disabled, no user syncs");
        return Vec::new();
    }

    let url = match build_sync_query(consent, us_privacy) {
        Some(query) => format!("{}?{}", sync_url, query),
        None => sync_url.to_string(),
    };

    vec![UserSync {
        kind: SyncKind::Iframe,
        url,
    }]
}

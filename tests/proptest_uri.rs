//! Property-based tests using proptest
//!
//! These tests verify request URI construction: query parameters are only
//! emitted when set, and identifiers can never break out of their path segment.

use cfcerts::cloudflare::client::{build_uri, path_segment};
use proptest::prelude::*;
use url::form_urlencoded;

const LIST_PATH: &str = "/zones/023e105f4ecef8ad9ca31a8372d0c353/client_certificates";

fn arb_status() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("active".to_string()),
        Just("pending_reactivation".to_string()),
        Just("pending_revocation".to_string()),
        Just("revoked".to_string()),
        ".{0,20}",
    ]
}

/// Decode the query string of a URI into pairs
fn query_pairs(uri: &str) -> Vec<(String, String)> {
    match uri.split_once('?') {
        Some((_, query)) => form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}

proptest! {
    /// The status parameter is present iff a non-empty filter was supplied
    #[test]
    fn status_present_iff_non_empty(status in arb_status()) {
        let uri = build_uri(LIST_PATH, &[("status", status.clone())]);
        let pairs = query_pairs(&uri);

        if status.is_empty() {
            prop_assert_eq!(uri.as_str(), LIST_PATH);
            prop_assert!(pairs.is_empty());
        } else {
            prop_assert_eq!(pairs, vec![("status".to_string(), status)]);
        }
    }

    /// The path before the query is never altered
    #[test]
    fn path_is_preserved(status in arb_status(), limit in proptest::option::of(1u32..1000)) {
        let uri = build_uri(
            LIST_PATH,
            &[
                ("status", status),
                ("limit", limit.map(|l| l.to_string()).unwrap_or_default()),
            ],
        );
        prop_assert!(uri.starts_with(LIST_PATH));
        let path = uri.split('?').next().unwrap();
        prop_assert_eq!(path, LIST_PATH);
    }

    /// Parameters keep their input order after encoding
    #[test]
    fn query_order_is_stable(status in "[a-z_]{1,20}", limit in 1u32..1000, offset in 0u32..1000) {
        let uri = build_uri(
            LIST_PATH,
            &[
                ("status", status.clone()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        );
        let keys: Vec<_> = query_pairs(&uri).into_iter().map(|(k, _)| k).collect();
        prop_assert_eq!(keys, vec!["status", "limit", "offset"]);
    }

    /// Encoded identifiers never introduce path or query separators
    #[test]
    fn path_segment_is_opaque(id in ".{0,64}") {
        let encoded = path_segment(&id);
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains('?'));
        prop_assert!(!encoded.contains('#'));
        let decoded = urlencoding::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_ref(), id.as_str());
    }
}

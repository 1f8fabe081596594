//! Link entity as served by the TinyLink backend.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for target URL validation (http/https with a dotted host).
pub(crate) static TARGET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_\+.~#?&/=]*)$",
    )
    .unwrap()
});

/// Compiled regex for custom short code validation.
pub(crate) static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// A short code and the redirect target it resolves to.
///
/// `code` is the unique key of the collection. Click counters are owned by
/// the backend; the client only ever replaces a whole `Link` with a newer
/// server payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub code: String,
    pub target_url: String,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(
        code: impl Into<String>,
        target_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
            total_clicks: 0,
            last_clicked_time: None,
            created_at,
        }
    }

    /// Builds the public short URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Link details returned by the per-code stats endpoint.
///
/// Carries the regular link fields plus whatever analytics fields the
/// backend adds; unknown fields are kept verbatim in `analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    #[serde(flatten)]
    pub link: Link,
    #[serde(flatten)]
    pub analytics: BTreeMap<String, Value>,
}

/// Payload for `POST /api/links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    /// Redirect destination, must start with `http://` or `https://`.
    #[validate(regex(path = "*TARGET_URL_REGEX"))]
    pub target_url: String,

    /// Optional custom short code, 6-8 characters of `[A-Za-z0-9]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

impl NewLink {
    /// Builds a create payload from raw form input.
    ///
    /// An empty custom code means "let the backend pick one" and is dropped.
    /// Nothing else is trimmed: padded input fails validation, and a payload
    /// that passes it carries no whitespace.
    pub fn new(target_url: impl Into<String>, custom_code: Option<String>) -> Self {
        Self {
            target_url: target_url.into(),
            custom_code: custom_code.filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_link_deserializes_backend_payload() {
        let link: Link = serde_json::from_value(json!({
            "code": "abc123",
            "targetUrl": "https://example.com",
            "totalClicks": 7,
            "lastClickedTime": null,
            "createdAt": "2024-01-15T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.total_clicks, 7);
        assert!(link.last_clicked_time.is_none());
        assert_eq!(
            link.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_link_missing_counters_default() {
        let link: Link = serde_json::from_value(json!({
            "code": "abc123",
            "targetUrl": "https://example.com",
            "createdAt": "2024-01-15T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked_time.is_none());
    }

    #[test]
    fn test_short_url() {
        let link = Link::new("abc123", "https://example.com", Utc::now());
        assert_eq!(link.short_url("https://s.example.com/"), "https://s.example.com/abc123");
        assert_eq!(link.short_url("https://s.example.com"), "https://s.example.com/abc123");
    }

    #[test]
    fn test_stats_keeps_extra_fields() {
        let stats: LinkStats = serde_json::from_value(json!({
            "code": "abc123",
            "targetUrl": "https://example.com",
            "totalClicks": 3,
            "lastClickedTime": "2024-02-01T00:00:00Z",
            "createdAt": "2024-01-15T10:30:00Z",
            "uniqueVisitors": 2
        }))
        .unwrap();

        assert_eq!(stats.link.code, "abc123");
        assert_eq!(stats.link.total_clicks, 3);
        assert_eq!(stats.analytics.get("uniqueVisitors"), Some(&json!(2)));
        assert!(!stats.analytics.contains_key("code"));
    }

    #[test]
    fn test_new_link_serializes_without_empty_code() {
        let payload = NewLink::new("https://example.com", Some(String::new()));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "targetUrl": "https://example.com" })
        );

        let payload = NewLink::new("https://example.com", Some("mydocs1".to_string()));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "targetUrl": "https://example.com", "customCode": "mydocs1" })
        );
    }

    #[test]
    fn test_new_link_keeps_raw_input() {
        let payload = NewLink::new("  https://example.com", Some(" abc123 ".to_string()));
        assert_eq!(payload.target_url, "  https://example.com");
        assert_eq!(payload.custom_code.as_deref(), Some(" abc123 "));

        let payload = NewLink::new("https://example.com", Some("   ".to_string()));
        assert_eq!(payload.custom_code.as_deref(), Some("   "));
    }
}

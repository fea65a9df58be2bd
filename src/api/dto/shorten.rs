//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so that a missing or `null` field
/// reaches validation and yields the same error as an empty string. Numbers
/// and booleans are accepted and kept in their JSON text form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL is required")
    )]
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;

    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

/// Identifier assigned to the new short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_null_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str(r#"{ "url": null }"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str(r#"{ "url": "" }"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_whitespace_url_passes_validation() {
        let request: ShortenRequest = serde_json::from_str(r#"{ "url": "   " }"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("   "));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_scalar_urls_become_text() {
        let number: ShortenRequest = serde_json::from_str(r#"{ "url": 42 }"#).unwrap();
        assert_eq!(number.url.as_deref(), Some("42"));

        let flag: ShortenRequest = serde_json::from_str(r#"{ "url": true }"#).unwrap();
        assert_eq!(flag.url.as_deref(), Some("true"));
    }

    #[test]
    fn test_structured_url_is_rejected() {
        assert!(serde_json::from_str::<ShortenRequest>(r#"{ "url": ["a"] }"#).is_err());
        assert!(serde_json::from_str::<ShortenRequest>(r#"{ "url": { "a": 1 } }"#).is_err());
    }

    #[test]
    fn test_present_url_passes_validation() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{ "url": "https://example.com" }"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let json = serde_json::to_value(ShortenResponse {
            short_id: "abc123".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "shortId": "abc123" }));
    }
}

use crate::extract::{extract_description, extract_meta, extract_title};
use crate::Fields;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata extracted from one fetched page
///
/// Only the fields selected by the request's [`Fields`] mask are populated;
/// the rest keep their zero value. An empty `title` therefore means either
/// "no title" or "title not requested". `url` is always set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// `og:*`, `twitter:*` and any other `name`/`property` meta tags
    #[serde(rename = "Meta")]
    pub meta: Option<HashMap<String, String>>,

    /// Full response body
    #[serde(rename = "Content")]
    pub content: String,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builds a record from a fully buffered document, running only the
    /// extractions selected by `mask`.
    pub fn from_html(url: impl Into<String>, html: &str, mask: Fields) -> Self {
        let mut link = Link::new(url);

        if mask.has(Fields::CONTENT) {
            link.content = html.to_string();
        }
        if mask.has(Fields::TITLE) {
            link.title = extract_title(html);
        }
        if mask.has(Fields::DESCRIPTION) {
            link.description = extract_description(html);
        }
        if mask.has(Fields::META) {
            link.meta = Some(extract_meta(html));
        }

        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
<title>Example Domain</title>
<meta name="description" content="An example page">
<meta property="og:title" content="Example OG">
</head><body><p>Hi</p></body></html>"#;

    #[test]
    fn test_all_fields_populated() {
        let link = Link::from_html("https://example.com", PAGE, Fields::ALL);

        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.title, "Example Domain");
        assert_eq!(link.description, "An example page");
        assert_eq!(link.content, PAGE);

        let meta = link.meta.expect("meta requested");
        assert_eq!(meta.get("og:title").map(String::as_str), Some("Example OG"));
        assert_eq!(
            meta.get("description").map(String::as_str),
            Some("An example page")
        );
    }

    #[test]
    fn test_unselected_fields_stay_zero() {
        for bits in 0..=Fields::ALL.bits() {
            let mask = Fields::from_bits(bits);
            let link = Link::from_html("https://example.com", PAGE, mask);

            assert_eq!(link.url, "https://example.com");
            assert_eq!(link.title.is_empty(), !mask.has(Fields::TITLE));
            assert_eq!(link.description.is_empty(), !mask.has(Fields::DESCRIPTION));
            assert_eq!(link.meta.is_none(), !mask.has(Fields::META));
            assert_eq!(link.content.is_empty(), !mask.has(Fields::CONTENT));
        }
    }

    #[test]
    fn test_meta_requested_but_absent_is_empty_map() {
        let link = Link::from_html("https://example.com", "<p>plain</p>", Fields::META);
        assert_eq!(link.meta, Some(HashMap::new()));
    }

    #[test]
    fn test_json_field_names() {
        let link = Link::from_html("https://example.com", "<title>T</title>", Fields::TITLE);
        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(json["URL"], "https://example.com");
        assert_eq!(json["Title"], "T");
        assert_eq!(json["Description"], "");
        assert!(json["Meta"].is_null());
        assert_eq!(json["Content"], "");
    }
}

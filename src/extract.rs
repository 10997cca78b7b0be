//! Regex-based metadata extraction over raw HTML
//!
//! No parsing happens here: the patterns scan the document text directly.
//! They are sensitive to attribute order (`content` must come after `name` or
//! `property`) and do not trim what they capture.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const TITLE_PATTERN: &str = r"<title.*?>([^<]+)";
// Attribute separators are ASCII whitespace without \v; a non-breaking space does not count.
const DESCRIPTION_PATTERN: &str =
    r#"<meta[\t\n\f\r ]+name=["']description["'][\t\n\f\r ]+content=["']([^"']+)"#;
const META_PATTERN: &str =
    r#"<meta[\t\n\f\r ]+(?:property|name)=["']([^"']+)["'][\t\n\f\r ]+content=["']([^"']+)"#;

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in extraction pattern must compile"))
}

pub fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, TITLE_PATTERN)
}

pub fn description_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, DESCRIPTION_PATTERN)
}

pub fn meta_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, META_PATTERN)
}

/// First capture group of the first match, or an empty string.
pub fn first_match(html: &str, re: &Regex) -> String {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Both capture groups of every match, in document order.
///
/// Matches where either group did not participate are skipped.
pub fn all_matches(html: &str, re: &Regex) -> Vec<(String, String)> {
    re.captures_iter(html)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(key), Some(value)) => {
                Some((key.as_str().to_string(), value.as_str().to_string()))
            }
            _ => None,
        })
        .collect()
}

pub fn extract_title(html: &str) -> String {
    first_match(html, title_regex())
}

pub fn extract_description(html: &str) -> String {
    first_match(html, description_regex())
}

/// Every `name`/`property` meta tag folded into a map; later duplicates win.
pub fn extract_meta(html: &str) -> HashMap<String, String> {
    let mut meta = HashMap::new();
    for (key, value) in all_matches(html, meta_regex()) {
        meta.insert(key, value);
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_keeps_whitespace() {
        let html = r#"<html><head><title class="x">  My Page  </title></head></html>"#;
        assert_eq!(extract_title(html), "  My Page  ");
    }

    #[test]
    fn test_title_first_occurrence_wins() {
        let html = "<title>First</title><title>Second</title>";
        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn test_missing_title_is_empty() {
        assert_eq!(extract_title("<html><body>nothing</body></html>"), "");
    }

    #[test]
    fn test_description_requires_name_before_content() {
        let ordered = r#"<meta name="description" content="World">"#;
        assert_eq!(extract_description(ordered), "World");

        let reversed = r#"<meta content="World" name="description">"#;
        assert_eq!(extract_description(reversed), "");
    }

    #[test]
    fn test_description_accepts_single_quotes() {
        let html = "<meta name='description' content='Single quoted'>";
        assert_eq!(extract_description(html), "Single quoted");
    }

    #[test]
    fn test_attribute_separator_is_ascii_whitespace() {
        let nbsp = "<meta\u{a0}name=\"description\"\u{a0}content=\"x\">";
        assert_eq!(extract_description(nbsp), "");
        assert!(extract_meta(nbsp).is_empty());

        let vertical_tab = "<meta\u{b}name=\"description\" content=\"x\">";
        assert_eq!(extract_description(vertical_tab), "");

        let mixed = "<meta\tname=\"description\"\n  content=\"x\">";
        assert_eq!(extract_description(mixed), "x");
        assert_eq!(extract_meta(mixed).get("description").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_meta_captures_property_and_name() {
        let html = r#"
            <meta property="og:title" content="Hello">
            <meta name="description" content="World">
            <meta name="twitter:card" content='summary'>
        "#;

        let meta = extract_meta(html);
        assert_eq!(meta.get("og:title").map(String::as_str), Some("Hello"));
        assert_eq!(meta.get("description").map(String::as_str), Some("World"));
        assert_eq!(meta.get("twitter:card").map(String::as_str), Some("summary"));
        assert_eq!(meta.len(), 3);
    }

    #[test]
    fn test_meta_last_duplicate_wins() {
        let html = r#"
            <meta property="og:title" content="One">
            <meta property="og:title" content="Two">
        "#;

        assert_eq!(
            extract_meta(html).get("og:title").map(String::as_str),
            Some("Two")
        );
    }

    #[test]
    fn test_all_matches_in_document_order() {
        let html = r#"<meta name="a" content="1"><meta property="b" content="2">"#;
        let pairs = all_matches(html, meta_regex());
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_matches_drops_single_group_matches() {
        let re = Regex::new(r"k=(\w+)(?:,v=(\w+))?").unwrap();
        let pairs = all_matches("k=a,v=1 k=b k=c,v=3", &re);
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_first_match_without_group_match() {
        let re = Regex::new(r"<h1>([^<]+)</h1>").unwrap();
        assert_eq!(first_match("<h2>x</h2>", &re), "");
        assert_eq!(first_match("<h1>x</h1>", &re), "x");
    }
}

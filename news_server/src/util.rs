use std::collections::HashMap;

use news_core::scrape::DEFAULT_CONTENT_LIMIT;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_TRENDING_LIMIT: usize = 10;
pub const SEARCH_TAG_COUNT: usize = 5;
pub const TRENDING_TAG_COUNT: usize = 3;

/// A non-empty, trimmed query parameter.
pub fn get_param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// A numeric parameter; missing or unparseable values fall back to `default`.
pub fn get_number(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    get_param(params, key)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

pub fn get_page_and_limit(params: &HashMap<String, String>) -> (usize, usize) {
    let page = get_number(params, "page", 1);
    let limit = get_number(params, "limit", DEFAULT_PAGE_SIZE);
    (page, limit)
}

pub fn get_flag(params: &HashMap<String, String>, key: &str) -> bool {
    get_param(params, key) == Some("true")
}

/// `contentLimit`; zero or invalid values use the default.
pub fn get_content_limit(params: &HashMap<String, String>) -> usize {
    match get_number(params, "contentLimit", DEFAULT_CONTENT_LIMIT) {
        0 => DEFAULT_CONTENT_LIMIT,
        limit => limit,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_page_and_limit() {
        assert_eq!(get_page_and_limit(&params(&[])), (1, 10));
        assert_eq!(get_page_and_limit(&params(&[("page", "3"), ("limit", "5")])), (3, 5));
        assert_eq!(get_page_and_limit(&params(&[("page", "-1"), ("limit", "abc")])), (1, 10));
    }

    #[test]
    fn test_content_limit_and_flags() {
        assert_eq!(get_content_limit(&params(&[])), 500);
        assert_eq!(get_content_limit(&params(&[("contentLimit", "0")])), 500);
        assert_eq!(get_content_limit(&params(&[("contentLimit", "x")])), 500);
        assert_eq!(get_content_limit(&params(&[("contentLimit", "120")])), 120);

        assert!(get_flag(&params(&[("content", "true")]), "content"));
        assert!(!get_flag(&params(&[("content", "1")]), "content"));
        assert_eq!(get_param(&params(&[("q", "  ")]), "q"), None);
    }
}

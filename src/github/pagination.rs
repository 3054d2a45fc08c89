//! `Link` header pagination.

use regex::Regex;
use std::sync::OnceLock;

static NEXT_LINK: OnceLock<Option<Regex>> = OnceLock::new();

/// Extract the `page` number of the `rel="next"` entry of a `Link` header
pub fn next_page_from_link(header: &str) -> Option<u32> {
    let pattern = NEXT_LINK
        .get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).ok())
        .as_ref()?;

    header.split(',').find_map(|entry| {
        let target = pattern.captures(entry)?.get(1)?.as_str();
        let url = url::Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_found() {
        let header = r#"<https://api.github.com/repositories/1/commits/abc/pulls?page=2>; rel="next", <https://api.github.com/repositories/1/commits/abc/pulls?page=5>; rel="last""#;
        assert_eq!(next_page_from_link(header), Some(2));
    }

    #[test]
    fn test_next_page_absent_on_last_page() {
        let header = r#"<https://api.github.com/repositories/1/pulls?page=4>; rel="prev", <https://api.github.com/repositories/1/pulls?page=1>; rel="first""#;
        assert_eq!(next_page_from_link(header), None);
    }

    #[test]
    fn test_next_page_ignores_other_query_params() {
        let header = r#"<https://api.github.com/search/issues?q=repo%3Acilium%2Fcilium&per_page=100&page=3>; rel="next""#;
        assert_eq!(next_page_from_link(header), Some(3));
    }
}

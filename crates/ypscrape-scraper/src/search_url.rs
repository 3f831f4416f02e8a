use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use ypscrape_core::SearchRequest;

/// Characters left as-is inside a query value (RFC 3986 unreserved set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the search results URL for one page:
/// `{base}/search?search_terms={terms}&geo_location_terms={geo}&page={n}`.
///
/// Terms are percent-encoded so spaces, commas and `&` cannot corrupt the
/// query string.
#[must_use]
pub fn search_url(base_url: &str, request: &SearchRequest, page: u32) -> String {
    let base = base_url.trim_end_matches('/');
    let terms = utf8_percent_encode(request.search_terms(), QUERY_VALUE);
    let geo = utf8_percent_encode(request.geo_location_terms(), QUERY_VALUE);
    format!("{base}/search?search_terms={terms}&geo_location_terms={geo}&page={page}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(terms: &str, geo: &str) -> SearchRequest {
        SearchRequest::new(terms, geo, 1, 1).unwrap()
    }

    #[test]
    fn builds_url_for_plain_terms() {
        let url = search_url("https://www.yellowpages.com", &request("plumbers", "Boston"), 2);
        assert_eq!(
            url,
            "https://www.yellowpages.com/search?search_terms=plumbers&geo_location_terms=Boston&page=2"
        );
    }

    #[test]
    fn encodes_spaces_and_commas() {
        let url = search_url(
            "https://www.yellowpages.com",
            &request("coffee shops", "Springfield, IL"),
            1,
        );
        assert_eq!(
            url,
            "https://www.yellowpages.com/search?search_terms=coffee%20shops&geo_location_terms=Springfield%2C%20IL&page=1"
        );
    }

    #[test]
    fn encodes_query_delimiters_in_terms() {
        let url = search_url("http://x", &request("bed & breakfast", "a=b?"), 1);
        assert_eq!(
            url,
            "http://x/search?search_terms=bed%20%26%20breakfast&geo_location_terms=a%3Db%3F&page=1"
        );
    }

    #[test]
    fn keeps_unreserved_characters() {
        let url = search_url("http://x", &request("auto-repair_shop.v2~", "NY"), 1);
        assert!(url.contains("search_terms=auto-repair_shop.v2~&"), "{url}");
    }

    #[test]
    fn strips_trailing_slash_from_base() {
        let url = search_url("http://x/", &request("a", "b"), 3);
        assert_eq!(url, "http://x/search?search_terms=a&geo_location_terms=b&page=3");
    }

    #[test]
    fn encodes_non_ascii_as_utf8() {
        let url = search_url("http://x", &request("café", "Montréal"), 1);
        assert!(url.contains("search_terms=caf%C3%A9&"), "{url}");
        assert!(url.contains("geo_location_terms=Montr%C3%A9al&"), "{url}");
    }
}

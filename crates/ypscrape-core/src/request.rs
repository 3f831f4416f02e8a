use thiserror::Error;

/// Operator input for one run. Immutable once constructed.
///
/// `max_page < start_page` is accepted: such a request simply scrapes zero
/// pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    search_terms: String,
    geo_location_terms: String,
    start_page: u32,
    max_page: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("search terms are missing")]
    MissingSearchTerms,

    #[error("geo location terms are missing")]
    MissingGeoLocation,

    #[error("invalid {field}: \"{value}\"")]
    InvalidPage { field: &'static str, value: String },
}

impl SearchRequest {
    /// Validates and builds a request. Terms are trimmed.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MissingSearchTerms`] / [`RequestError::MissingGeoLocation`]
    ///   when either term is blank.
    /// - [`RequestError::InvalidPage`] when `start_page` is zero.
    pub fn new(
        search_terms: &str,
        geo_location_terms: &str,
        start_page: u32,
        max_page: u32,
    ) -> Result<Self, RequestError> {
        let search_terms = search_terms.trim();
        if search_terms.is_empty() {
            return Err(RequestError::MissingSearchTerms);
        }
        let geo_location_terms = geo_location_terms.trim();
        if geo_location_terms.is_empty() {
            return Err(RequestError::MissingGeoLocation);
        }
        if start_page == 0 {
            return Err(RequestError::InvalidPage {
                field: "start page",
                value: start_page.to_string(),
            });
        }

        Ok(Self {
            search_terms: search_terms.to_owned(),
            geo_location_terms: geo_location_terms.to_owned(),
            start_page,
            max_page,
        })
    }

    #[must_use]
    pub fn search_terms(&self) -> &str {
        &self.search_terms
    }

    #[must_use]
    pub fn geo_location_terms(&self) -> &str {
        &self.geo_location_terms
    }

    #[must_use]
    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    #[must_use]
    pub fn max_page(&self) -> u32 {
        self.max_page
    }

    /// Number of pages the request permits, zero when the bounds are inverted.
    #[must_use]
    pub fn page_span(&self) -> u32 {
        if self.max_page < self.start_page {
            0
        } else {
            self.max_page - self.start_page + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_terms() {
        let req = SearchRequest::new("  plumbers ", " Springfield, IL ", 1, 3).unwrap();
        assert_eq!(req.search_terms(), "plumbers");
        assert_eq!(req.geo_location_terms(), "Springfield, IL");
    }

    #[test]
    fn new_rejects_blank_search_terms() {
        assert_eq!(
            SearchRequest::new("   ", "Springfield", 1, 2),
            Err(RequestError::MissingSearchTerms)
        );
    }

    #[test]
    fn new_rejects_blank_geo_terms() {
        assert_eq!(
            SearchRequest::new("plumbers", "", 1, 2),
            Err(RequestError::MissingGeoLocation)
        );
    }

    #[test]
    fn new_rejects_zero_start_page() {
        let err = SearchRequest::new("plumbers", "Springfield", 0, 2).unwrap_err();
        assert!(matches!(err, RequestError::InvalidPage { field: "start page", .. }));
    }

    #[test]
    fn inverted_bounds_are_accepted_with_zero_span() {
        let req = SearchRequest::new("plumbers", "Springfield", 5, 2).unwrap();
        assert_eq!(req.page_span(), 0);
    }

    #[test]
    fn page_span_is_inclusive() {
        let req = SearchRequest::new("plumbers", "Springfield", 2, 4).unwrap();
        assert_eq!(req.page_span(), 3);
    }
}

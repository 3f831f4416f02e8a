//! Capability traits over a browser automation backend.
//!
//! The pagination driver and card extractor only ever talk to these traits,
//! so the concrete backend (a WebDriver session, or the in-memory
//! [`crate::canned`] session) can be swapped freely.

use crate::error::ScraperError;

/// A node in a loaded page that can be queried further.
#[allow(async_fn_in_trait)]
pub trait ElementHandle: Sized {
    /// All descendants matching a CSS `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Query`] when the backend cannot run the query.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError>;

    /// Rendered text content.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Query`] when the element can no longer be read.
    async fn text(&self) -> Result<String, ScraperError>;

    /// Attribute value, `None` when the element has no such attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Query`] when the element can no longer be read.
    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError>;
}

/// One browser session, exclusively owned for the duration of a run.
#[allow(async_fn_in_trait)]
pub trait BrowsingSession: Sized {
    type Element: ElementHandle;

    /// Load `url` in the session's only tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Navigation`] when the page cannot be loaded.
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// All elements in the current document matching a CSS `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Query`] when the backend cannot run the query.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError>;

    /// Release the underlying browser. Consumes the session so it can only
    /// happen once.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] when the backend reports a failure
    /// while shutting down.
    async fn close(self) -> Result<(), ScraperError>;
}

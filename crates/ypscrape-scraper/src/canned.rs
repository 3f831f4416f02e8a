//! In-memory browsing session serving pre-built card structures.
//!
//! Used as the test double for [`BrowsingSession`] and for replaying known
//! page layouts without a browser. Every navigation and close is recorded in
//! a shared [`SessionLog`] that outlives the session itself.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use crate::browse::{BrowsingSession, ElementHandle};
use crate::error::ScraperError;
use crate::extract::selectors;

/// A canned element: text, attributes, and children keyed by the exact
/// selector string that finds them.
#[derive(Debug, Clone, Default)]
pub struct CannedElement {
    text: String,
    attributes: HashMap<String, String>,
    children: HashMap<String, Vec<CannedElement>>,
    failing: HashSet<String>,
}

impl CannedElement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends `child` to the elements returned for `selector`.
    #[must_use]
    pub fn with_child(mut self, selector: impl Into<String>, child: CannedElement) -> Self {
        self.children.entry(selector.into()).or_default().push(child);
        self
    }

    /// Makes queries for `selector` fail instead of returning children.
    #[must_use]
    pub fn failing_on(mut self, selector: impl Into<String>) -> Self {
        self.failing.insert(selector.into());
        self
    }
}

impl ElementHandle for CannedElement {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError> {
        if self.failing.contains(selector) {
            return Err(ScraperError::Query {
                selector: selector.to_owned(),
                reason: "canned query failure".to_owned(),
            });
        }
        Ok(self.children.get(selector).cloned().unwrap_or_default())
    }

    async fn text(&self) -> Result<String, ScraperError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.attributes.get(name).cloned())
    }
}

/// What the next navigation lands on.
#[derive(Debug, Clone)]
pub enum CannedPage {
    /// A page whose card query returns these cards (possibly none).
    Cards(Vec<CannedElement>),
    /// Navigation itself fails with the given reason.
    NavigationFails(String),
    /// Navigation succeeds but the card query fails with the given reason.
    QueryFails(String),
}

#[derive(Debug, Default)]
struct LogInner {
    navigations: Vec<String>,
    closes: usize,
}

/// Shared record of what a [`CannedSession`] was asked to do.
#[derive(Debug, Clone, Default)]
pub struct SessionLog(Arc<Mutex<LogInner>>);

impl SessionLog {
    /// URLs navigated to, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .navigations
            .clone()
    }

    /// How many times the session was closed.
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).closes
    }

    fn record_navigation(&self, url: &str) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .navigations
            .push(url.to_owned());
    }

    fn record_close(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).closes += 1;
    }
}

/// Serves [`CannedPage`]s in order, one per navigation. Navigating past the
/// last canned page lands on an empty results page.
#[derive(Debug)]
pub struct CannedSession {
    pages: VecDeque<CannedPage>,
    current: Option<CannedPage>,
    log: SessionLog,
}

impl CannedSession {
    #[must_use]
    pub fn new(pages: impl IntoIterator<Item = CannedPage>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            current: None,
            log: SessionLog::default(),
        }
    }

    /// Handle to this session's log; stays valid after the session is closed.
    #[must_use]
    pub fn log(&self) -> SessionLog {
        self.log.clone()
    }
}

impl BrowsingSession for CannedSession {
    type Element = CannedElement;

    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.log.record_navigation(url);
        match self.pages.pop_front() {
            Some(CannedPage::NavigationFails(reason)) => {
                self.current = None;
                Err(ScraperError::Navigation {
                    url: url.to_owned(),
                    reason,
                })
            }
            page => {
                self.current = page;
                Ok(())
            }
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError> {
        match &self.current {
            Some(CannedPage::QueryFails(reason)) => Err(ScraperError::Query {
                selector: selector.to_owned(),
                reason: reason.clone(),
            }),
            Some(CannedPage::Cards(cards)) if selector == selectors::CARD => Ok(cards.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.log.record_close();
        Ok(())
    }
}

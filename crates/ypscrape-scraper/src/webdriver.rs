//! WebDriver-backed browsing session (chromedriver or a Selenium grid).

use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};

use crate::browse::{BrowsingSession, ElementHandle};
use crate::error::ScraperError;

/// Chrome flags for running inside containers and CI hosts.
const CHROME_ARGS: [&str; 2] = ["--no-sandbox", "--disable-dev-shm-usage"];

pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Opens a Chrome session on the WebDriver server at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] if capabilities are rejected or the
    /// server cannot start a session.
    pub async fn connect(server_url: &str, headless: bool) -> Result<Self, ScraperError> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.add_arg("--headless=new").map_err(session_error)?;
        }
        for arg in CHROME_ARGS {
            caps.add_arg(arg).map_err(session_error)?;
        }

        let driver = WebDriver::new(server_url, caps)
            .await
            .map_err(session_error)?;
        tracing::debug!(server_url, headless, "webdriver session started");

        Ok(Self { driver })
    }
}

fn session_error(e: thirtyfour::error::WebDriverError) -> ScraperError {
    ScraperError::Session {
        reason: e.to_string(),
    }
}

fn query_error(selector: &str, e: &thirtyfour::error::WebDriverError) -> ScraperError {
    ScraperError::Query {
        selector: selector.to_owned(),
        reason: e.to_string(),
    }
}

/// A live element in the session's current document.
pub struct WebDriverElement(WebElement);

impl ElementHandle for WebDriverElement {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError> {
        let found = self
            .0
            .find_all(By::Css(selector.to_owned()))
            .await
            .map_err(|e| query_error(selector, &e))?;
        Ok(found.into_iter().map(WebDriverElement).collect())
    }

    async fn text(&self) -> Result<String, ScraperError> {
        self.0.text().await.map_err(|e| query_error("text()", &e))
    }

    /// Prefers the DOM property so `href` resolves to an absolute URL, and
    /// falls back to the raw attribute.
    async fn attribute(&self, name: &str) -> Result<Option<String>, ScraperError> {
        let property = self
            .0
            .prop(name.to_owned())
            .await
            .map_err(|e| query_error(name, &e))?;
        if property.is_some() {
            return Ok(property);
        }
        self.0
            .attr(name.to_owned())
            .await
            .map_err(|e| query_error(name, &e))
    }
}

impl BrowsingSession for WebDriverSession {
    type Element = WebDriverElement;

    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError> {
        let found = self
            .driver
            .find_all(By::Css(selector.to_owned()))
            .await
            .map_err(|e| query_error(selector, &e))?;
        Ok(found.into_iter().map(WebDriverElement).collect())
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.driver.quit().await.map_err(session_error)
    }
}

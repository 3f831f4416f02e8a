use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser session error: {reason}")]
    Session { reason: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("element query \"{selector}\" failed: {reason}")]
    Query { selector: String, reason: String },
}

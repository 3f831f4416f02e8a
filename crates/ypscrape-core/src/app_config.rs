use std::path::PathBuf;

/// Operational settings for a scrape run.
///
/// Search parameters are not part of it: they only ever arrive through a
/// [`crate::RequestSource`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workbook_dir: PathBuf,
    pub base_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    pub log_level: String,
}

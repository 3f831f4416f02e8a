pub mod browse;
pub mod canned;
pub mod driver;
pub mod error;
pub mod extract;
pub mod search_url;
pub mod webdriver;

pub use browse::{BrowsingSession, ElementHandle};
pub use driver::{PaginationDriver, SETTLE_DELAY};
pub use error::ScraperError;
pub use extract::extract_listing;
pub use search_url::search_url;
pub use webdriver::WebDriverSession;

//! Result-card extraction.
//!
//! Directory pages render partial cards (no reviews, no claimed website, no
//! street address), so every field slot is probed independently and an
//! absent or unreadable slot becomes an empty string. Extraction never fails.

use ypscrape_core::ListingRecord;

use crate::browse::ElementHandle;

/// CSS selectors for the directory's search results markup.
pub mod selectors {
    /// Organic (non-sponsored) listing cards on a results page.
    pub const CARD: &str = ".organic .srp-listing";
    pub const RANK: &str = ".info-primary h2";
    pub const BUSINESS_NAME: &str = ".business-name span";
    /// The name anchor; its `href` is the listing's detail page.
    pub const BUSINESS_LINK: &str = ".business-name";
    pub const PHONE: &str = ".phones";
    pub const WEBSITE: &str = ".track-visit-website";
    pub const CATEGORY: &str = ".categories a";
    pub const RATING_COUNT: &str = ".ratings .count";
    pub const STREET: &str = ".street-address";
    pub const LOCALITY: &str = ".locality";
}

/// Extracts a [`ListingRecord`] from one result card.
pub async fn extract_listing<E: ElementHandle>(card: &E) -> ListingRecord {
    let rank = probe_text(card, selectors::RANK).await;
    let business_name = probe_text(card, selectors::BUSINESS_NAME).await;
    let phone_number = probe_text(card, selectors::PHONE).await;
    let business_page_url = probe_attribute(card, selectors::BUSINESS_LINK, "href").await;
    let website_url = probe_attribute(card, selectors::WEBSITE, "href").await;
    let category = join_categories(&probe_all_texts(card, selectors::CATEGORY).await);
    let rating = probe_text(card, selectors::RATING_COUNT)
        .await
        .map(|raw| normalize_rating(&raw));
    let (locality, region) = probe_text(card, selectors::LOCALITY)
        .await
        .map(|raw| split_locality(&raw))
        .unwrap_or_default();

    ListingRecord {
        rank: trimmed(rank),
        business_name: trimmed(business_name),
        phone_number: trimmed(phone_number),
        business_page_url: business_page_url.unwrap_or_default(),
        website_url: website_url.unwrap_or_default(),
        category,
        rating: rating.unwrap_or_default(),
        street_name: trimmed(probe_text(card, selectors::STREET).await),
        locality,
        region,
    }
}

/// Strips whitespace and the parentheses wrapping a review count: `" (42) "` → `"42"`.
#[must_use]
pub fn normalize_rating(raw: &str) -> String {
    raw.trim().trim_matches(['(', ')']).trim().to_owned()
}

/// Splits `"Springfield, IL"` into `("Springfield", "IL")` on the first comma.
///
/// Without a comma the whole (trimmed) value is the locality and the region
/// is empty.
#[must_use]
pub fn split_locality(raw: &str) -> (String, String) {
    match raw.split_once(',') {
        Some((locality, region)) => (locality.trim().to_owned(), region.trim().to_owned()),
        None => (raw.trim().to_owned(), String::new()),
    }
}

/// Joins category labels with `", "` after trimming each.
#[must_use]
pub fn join_categories(labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| label.trim())
        .collect::<Vec<_>>()
        .join(", ")
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_owned()).unwrap_or_default()
}

/// First element matching `selector` under `card`, or `None` when absent or
/// the query fails.
async fn probe_first<E: ElementHandle>(card: &E, selector: &str) -> Option<E> {
    match card.find_all(selector).await {
        Ok(found) => found.into_iter().next(),
        Err(e) => {
            tracing::debug!(selector, error = %e, "card slot query failed; treating as absent");
            None
        }
    }
}

async fn probe_text<E: ElementHandle>(card: &E, selector: &str) -> Option<String> {
    let element = probe_first(card, selector).await?;
    match element.text().await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(selector, error = %e, "card slot text unreadable");
            None
        }
    }
}

async fn probe_attribute<E: ElementHandle>(card: &E, selector: &str, name: &str) -> Option<String> {
    let element = probe_first(card, selector).await?;
    match element.attribute(name).await {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(selector, attribute = name, error = %e, "card slot attribute unreadable");
            None
        }
    }
}

async fn probe_all_texts<E: ElementHandle>(card: &E, selector: &str) -> Vec<String> {
    let elements = match card.find_all(selector).await {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!(selector, error = %e, "card slot query failed; treating as absent");
            return Vec::new();
        }
    };

    let mut texts = Vec::with_capacity(elements.len());
    for element in &elements {
        match element.text().await {
            Ok(text) => texts.push(text),
            Err(e) => tracing::debug!(selector, error = %e, "skipping unreadable element"),
        }
    }
    texts
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

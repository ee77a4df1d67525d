//! Application layer module
//!
//! Use cases and data transfer objects that orchestrate the domain logic.

pub mod dto;
pub mod metadata_summarizer;
pub mod pagination_controller;
pub mod report_builder;
pub mod scrape_use_case;
pub mod state;

pub use dto::ScrapeAppResponse;
pub use pagination_controller::{PaginationController, PaginationSettings};
pub use scrape_use_case::{ScrapeOutcome, ScrapeUseCase};
pub use state::AppState;

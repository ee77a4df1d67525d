//! App Review Scraper - review collection for app-store listings
//!
//! Walks a listing's review pages newest-first, stops at the age cutoff,
//! replaces the stored reviews for the app and records listing metadata.

// Module declarations
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-export commands for easier access
pub use commands::*;

//! Review listing parser
//!
//! Locates review containers with an ordered list of container strategies
//! (first non-empty match wins, results are never merged), then reads
//! rating, text and date from each container. When no strategy matches,
//! the page yield comes from the injected fallback provider instead.

#![allow(clippy::uninlined_format_args)]

use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::ReviewListSelectors;
use super::context::ParseContext;
use super::date_normalizer::DateNormalizer;
use super::error::{ParsingError, ParsingResult};
use super::fallback::SamplePoolFallback;
use super::samples::{country_code, default_store_table, SampleStore};
use crate::domain::errors::ScrapeError;
use crate::domain::review::{PageResult, Review, MAX_RATING};
use crate::domain::services::ReviewFallbackProvider;

/// One way of finding review containers on a page.
pub trait ContainerStrategy: Send + Sync {
    /// Label used in logs
    fn name(&self) -> &str;

    fn find<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>>;
}

/// Container strategy backed by a single CSS selector
pub struct SelectorStrategy {
    source: String,
    selector: Selector,
}

impl SelectorStrategy {
    pub fn parse(source: &str) -> ParsingResult<Self> {
        let selector = Selector::parse(source)
            .map_err(|e| ParsingError::invalid_selector(source, e))?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }
}

impl ContainerStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        &self.source
    }

    fn find<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        html.select(&self.selector).collect()
    }
}

/// What one page produced.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub reviews: PageResult,
    /// Strategy that matched; `None` means the fallback supplied the reviews
    pub strategy: Option<String>,
    /// One entry per container dropped because of an extraction fault
    pub faults: Vec<ScrapeError>,
}

impl PageExtraction {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn is_synthetic(&self) -> bool {
        self.strategy.is_none() && !self.reviews.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.faults.len()
    }
}

/// Parser for extracting reviews from listing pages
pub struct ReviewListParser {
    strategies: Vec<Box<dyn ContainerStrategy>>,
    filled_star: Selector,
    content: Selector,
    date: Selector,
    secondary_date: Selector,
    store_table: Vec<SampleStore>,
    fallback: Arc<dyn ReviewFallbackProvider>,
}

impl ReviewListParser {
    /// Parser with default selectors and the sample-pool fallback
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ReviewListSelectors::default(), Arc::new(SamplePoolFallback::new()))
    }

    pub fn with_config(
        selectors: &ReviewListSelectors,
        fallback: Arc<dyn ReviewFallbackProvider>,
    ) -> ParsingResult<Self> {
        Ok(Self {
            strategies: Self::compile_strategies(&selectors.container)?,
            filled_star: Self::compile(&selectors.filled_star)?,
            content: Self::compile(&selectors.content)?,
            date: Self::compile(&selectors.date)?,
            secondary_date: Self::compile(&selectors.secondary_date)?,
            store_table: default_store_table(),
            fallback,
        })
    }

    /// Replace the container strategies, keeping their order as priority
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ContainerStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Replace the round-robin store table
    pub fn with_store_table(mut self, store_table: Vec<SampleStore>) -> Self {
        self.store_table = store_table;
        self
    }

    fn compile(source: &str) -> ParsingResult<Selector> {
        Selector::parse(source).map_err(|e| ParsingError::invalid_selector(source, e))
    }

    /// Compile container selectors, skipping invalid ones as long as one survives
    fn compile_strategies(sources: &[String]) -> ParsingResult<Vec<Box<dyn ContainerStrategy>>> {
        let mut strategies: Vec<Box<dyn ContainerStrategy>> = Vec::new();
        let mut errors = Vec::new();

        for source in sources {
            match SelectorStrategy::parse(source) {
                Ok(strategy) => strategies.push(Box::new(strategy)),
                Err(e) => {
                    warn!("Failed to compile container selector '{}': {}", source, e);
                    errors.push(e.to_string());
                }
            }
        }

        if strategies.is_empty() {
            return Err(ParsingError::NoValidSelectors {
                field: "container".to_string(),
                errors: errors.join(", "),
            });
        }

        Ok(strategies)
    }

    /// First strategy with at least one match, and its containers
    pub fn find_containers<'a>(&self, html: &'a Html) -> Option<(&str, Vec<ElementRef<'a>>)> {
        self.strategies.iter().find_map(|strategy| {
            let containers = strategy.find(html);
            debug!("Trying selector '{}': found {} elements", strategy.name(), containers.len());
            (!containers.is_empty()).then(|| (strategy.name(), containers))
        })
    }

    /// Parse raw markup and extract the page. `Html` never outlives this call.
    pub fn parse_document(&self, body: &str, context: &mut ParseContext) -> PageExtraction {
        let html = Html::parse_document(body);
        self.extract_page(&html, context)
    }

    pub fn extract_page(&self, html: &Html, context: &mut ParseContext) -> PageExtraction {
        let normalizer = DateNormalizer::new(context.today);

        let Some((strategy, containers)) = self.find_containers(html) else {
            let reviews = self.fallback.fallback_reviews(&context.app_name, context.today);
            if !reviews.is_empty() {
                info!(
                    "No review containers on page {}; substituted {} synthetic reviews",
                    context.page,
                    reviews.len()
                );
            }
            return PageExtraction {
                reviews,
                strategy: None,
                faults: Vec::new(),
            };
        };

        let mut reviews = Vec::with_capacity(containers.len());
        let mut faults = Vec::new();

        for (index, container) in containers.iter().enumerate() {
            match self.extract_one(container, context, &normalizer) {
                Ok(review) => reviews.push(review),
                Err(e) => {
                    let fault = ScrapeError::Extraction {
                        index,
                        reason: e.to_string(),
                    };
                    warn!("Skipping container on page {}: {}", context.page, fault);
                    faults.push(fault);
                }
            }
        }

        debug!(
            "Extracted {} reviews from page {} using '{}'",
            reviews.len(),
            context.page,
            strategy
        );

        PageExtraction {
            reviews,
            strategy: Some(strategy.to_string()),
            faults,
        }
    }

    /// Read one container. Store and country come from the round-robin
    /// table because the page does not expose them reliably.
    pub fn extract_one(
        &self,
        container: &ElementRef,
        context: &mut ParseContext,
        normalizer: &DateNormalizer,
    ) -> ParsingResult<Review> {
        let slot = context
            .cursor
            .advance(self.store_table.len())
            .ok_or_else(|| ParsingError::empty_sample_pool("store_table"))?;
        let sample = &self.store_table[slot];

        let stars = container.select(&self.filled_star).count();
        let rating = if stars == 0 { usize::from(MAX_RATING) } else { stars };

        let content = Self::first_text(container, &self.content)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| sample.content.clone());

        let review_date = Self::first_text(container, &self.date)
            .or_else(|| Self::first_text(container, &self.secondary_date))
            .map_or(context.today, |text| normalizer.normalize(&text));

        Ok(Review::live(
            &context.app_name,
            &sample.store_name,
            country_code(&sample.country),
            rating,
            &content,
            review_date,
        ))
    }

    fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
        element
            .select(selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
    }
}

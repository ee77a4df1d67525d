//! Listing-page extraction throughput
//!
//! Measures container discovery plus field extraction for a full page, and
//! the fallback path taken when no container selector matches.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use app_review_scraper_lib::infrastructure::parsing::{DateNormalizer, ParseContext, ReviewListParser};

const DATES: &[&str] = &["2 days ago", "1 week ago", "March 3, 2024", "3 weeks ago", "2024-02-20"];

fn listing_page(reviews: usize) -> String {
    let blocks: String = (0..reviews)
        .map(|i| {
            format!(
                r#"<div data-review-content-id="{i}">
                     <div>{stars}</div>
                     <div class="tw-text-body-xs tw-text-fg-tertiary">{date}</div>
                     <p class="tw-break-words">Review number {i} with a few words of text.</p>
                   </div>"#,
                stars = r#"<svg class="tw-fill-fg-primary"></svg>"#.repeat(1 + i % 5),
                date = DATES[i % DATES.len()],
            )
        })
        .collect();
    format!("<html><body><main>{blocks}</main></body></html>")
}

fn bench_extraction(c: &mut Criterion) {
    let parser = ReviewListParser::new().expect("default selectors compile");
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date");
    let page = listing_page(10);
    let unstructured = "<html><body><p>nothing to see</p></body></html>";

    c.bench_function("extract_listing_page_10", |b| {
        b.iter(|| {
            let mut context = ParseContext::new("Vidify", today);
            black_box(parser.parse_document(black_box(&page), &mut context))
        })
    });

    c.bench_function("extract_fallback_page", |b| {
        b.iter(|| {
            let mut context = ParseContext::new("Vidify", today);
            black_box(parser.parse_document(black_box(unstructured), &mut context))
        })
    });

    let normalizer = DateNormalizer::new(today);
    c.bench_function("normalize_dates", |b| {
        b.iter(|| {
            for raw in DATES {
                black_box(normalizer.normalize(black_box(raw)));
            }
        })
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);

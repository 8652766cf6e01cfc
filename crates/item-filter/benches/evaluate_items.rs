//! Benchmarks for item evaluation
//!
//! Run with: cargo bench --package item-filter

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feed_config::{names, FeedItem, FilterOptions};
use item_filter::{should_skip_text, RulePipeline, TracingSink};

fn test_options() -> FilterOptions {
    FilterOptions::new()
        .with(names::EXCLUDE, "(?i)unsubscribe")
        .with(names::EXCLUDE_TITLE, "(?i)sponsored")
        .with(names::INCLUDE_TITLE, "(?i)rust")
        .with(names::INCLUDE_TITLE, "(?i)cargo")
        .with(names::EXCLUDE_CATEGORY, "(?i)ads?")
        .with(names::EXCLUDE_OLDER, "14")
}

fn test_items(count: usize) -> Vec<FeedItem> {
    (0..count)
        .map(|i| {
            let title = if i % 2 == 0 {
                format!("Rust weekly #{i}")
            } else {
                format!("Sponsored post #{i}")
            };
            FeedItem::new(title, "<p>Lorem ipsum dolor sit amet.</p>")
                .with_categories(["News", "Programming"])
                .with_published("Fri, 02 Dec 2022 16:43:04 +0000")
        })
        .collect()
}

fn bench_should_skip_text(c: &mut Criterion) {
    let options = test_options();
    let sink = TracingSink;

    c.bench_function("should_skip_text", |b| {
        b.iter(|| {
            let skip = should_skip_text(
                black_box(&options),
                black_box("Rust weekly #1"),
                black_box("<p>Lorem ipsum dolor sit amet.</p>"),
                &sink,
            );
            black_box(skip)
        })
    });
}

fn bench_filter_items(c: &mut Criterion) {
    let options = test_options();
    let pipeline = RulePipeline::standard();
    let sink = TracingSink;
    let items = test_items(500);

    c.bench_function("filter_items_500", |b| {
        b.iter(|| {
            let kept = pipeline.filter_items(black_box(&options), items.clone(), &sink);
            black_box(kept)
        })
    });
}

criterion_group!(benches, bench_should_skip_text, bench_filter_items);
criterion_main!(benches);

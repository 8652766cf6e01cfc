//! Per-feed item filtering.
//!
//! This crate provides:
//! - Rule trait and the text, category and age rule families
//! - RulePipeline for combining families into one skip/keep decision
//! - Diagnostic sinks that receive warnings about degraded rules
//!
//! ## Architecture
//! Each family looks at a feed's options and one item and answers "skip" or
//! "keep". An item is dropped if any family says skip. Configuration or data
//! the rules cannot make sense of (bad regex, bad threshold, unreadable date)
//! is reported to the sink and resolves to the family's fail-open default.
//!
//! ## Example Usage
//! ```ignore
//! use item_filter::{RulePipeline, TracingSink};
//!
//! let pipeline = RulePipeline::standard();
//! let verdict = pipeline.evaluate(&feed.options, &item, &TracingSink);
//!
//! if verdict.skip() {
//!     tracing::info!("skipping {} ({:?})", item.title, verdict.skipped_by());
//! }
//! ```

pub mod diagnostics;
pub mod rule_pipeline;
pub mod rules;
pub mod traits;

// Re-export main types
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Level, TracingSink};
pub use rule_pipeline::{should_skip, RuleDecision, RulePipeline, Verdict};
pub use rules::{
    parse_timestamp, should_skip_category, should_skip_older, should_skip_older_at,
    should_skip_text, AgeRule, AgeThresholds, CategoryPatterns, CategoryRule, Clock,
    CompiledOptions, FixedClock, PatternSet, SystemClock, TextPatterns, TextRule,
};
pub use traits::Rule;

//! The RulePipeline runs rule families over items.
//!
//! Families are independent: each sees the same options and item and
//! answers on its own. An item is skipped if any family says so.

use crate::diagnostics::DiagnosticSink;
use crate::rules::{
    should_skip_category, should_skip_older, should_skip_text, AgeRule, CategoryRule,
    CompiledOptions, TextRule,
};
use crate::traits::Rule;
use feed_config::{FeedItem, FilterOptions};
use rayon::prelude::*;

/// One family's answer for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecision {
    pub rule: String,
    pub skip: bool,
}

/// Per-family decisions for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    decisions: Vec<RuleDecision>,
}

impl Verdict {
    /// True if any family voted to skip.
    pub fn skip(&self) -> bool {
        self.decisions.iter().any(|decision| decision.skip)
    }

    /// Names of the families that voted to skip, in pipeline order.
    pub fn skipped_by(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|decision| decision.skip)
            .map(|decision| decision.rule.as_str())
            .collect()
    }

    /// The decision of the family called `rule`, if it ran.
    pub fn decision(&self, rule: &str) -> Option<bool> {
        self.decisions
            .iter()
            .find(|decision| decision.rule == rule)
            .map(|decision| decision.skip)
    }

    pub fn decisions(&self) -> &[RuleDecision] {
        &self.decisions
    }
}

/// Chains rule families into one decision.
///
/// ## Usage
/// ```ignore
/// let pipeline = RulePipeline::new()
///     .add_rule(TextRule)
///     .add_rule(CategoryRule)
///     .add_rule(AgeRule::new());
///
/// let verdict = pipeline.evaluate(&feed.options, &item, &TracingSink);
/// if verdict.skip() { ... }
/// ```
pub struct RulePipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl RulePipeline {
    /// Create a new empty RulePipeline.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The text, category and age families, measured against the system clock.
    pub fn standard() -> Self {
        Self::new()
            .add_rule(TextRule)
            .add_rule(CategoryRule)
            .add_rule(AgeRule::new())
    }

    /// Add a rule to the pipeline (builder pattern).
    pub fn add_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against one item.
    ///
    /// Compiles `options` first; callers evaluating many items of one feed
    /// should compile once and use [`RulePipeline::evaluate_compiled`].
    pub fn evaluate(
        &self,
        options: &FilterOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> Verdict {
        self.evaluate_compiled(&CompiledOptions::compile(options, sink), item, sink)
    }

    /// Run every rule against one item, with options already compiled.
    ///
    /// Rules are not short-circuited, so the verdict carries every family's
    /// decision and every family gets to report its diagnostics.
    pub fn evaluate_compiled(
        &self,
        options: &CompiledOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> Verdict {
        let decisions = self
            .rules
            .iter()
            .map(|rule| {
                let skip = rule.should_skip(options, item, sink);
                tracing::debug!(
                    "Rule {} on {:?}: {}",
                    rule.name(),
                    item.title,
                    if skip { "skip" } else { "keep" }
                );
                RuleDecision {
                    rule: rule.name().to_string(),
                    skip,
                }
            })
            .collect();

        Verdict { decisions }
    }

    /// Keep the items no rule wants to skip.
    ///
    /// Options are compiled once for the whole batch, then items are
    /// evaluated in parallel; kept items come back in input order.
    pub fn filter_items(
        &self,
        options: &FilterOptions,
        items: Vec<FeedItem>,
        sink: &dyn DiagnosticSink,
    ) -> Vec<FeedItem> {
        let compiled = CompiledOptions::compile(options, sink);
        let input_count = items.len();
        let kept: Vec<FeedItem> = items
            .into_par_iter()
            .filter(|item| !self.evaluate_compiled(&compiled, item, sink).skip())
            .collect();
        tracing::debug!(
            "Filtered items (input count: {}, output count: {})",
            input_count,
            kept.len()
        );
        kept
    }
}

impl Default for RulePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined decision of the text, category and age families.
pub fn should_skip(options: &FilterOptions, item: &FeedItem, sink: &dyn DiagnosticSink) -> bool {
    should_skip_text(options, &item.title, &item.content, sink)
        || should_skip_category(options, &item.categories, sink)
        || should_skip_older(options, &item.published, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::rules::FixedClock;
    use chrono::{Duration, TimeZone, Utc};
    use feed_config::names;

    fn fixed_pipeline() -> RulePipeline {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        RulePipeline::new()
            .add_rule(TextRule)
            .add_rule(CategoryRule)
            .add_rule(AgeRule::with_clock(FixedClock(now)))
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = RulePipeline::new();
        let sink = CollectingSink::new();
        let options = FilterOptions::new().with(names::EXCLUDE, ".*");

        let verdict = pipeline.evaluate(&options, &FeedItem::new("t", "c"), &sink);

        assert!(!verdict.skip());
        assert!(verdict.decisions().is_empty());
    }

    #[test]
    fn test_standard_has_three_families() {
        assert_eq!(RulePipeline::standard().len(), 3);
        assert!(RulePipeline::default().is_empty());
    }

    #[test]
    fn test_verdict_reports_each_family() {
        let options = FilterOptions::new()
            .with(names::EXCLUDE_TITLE, "(?i)sponsored")
            .with(names::INCLUDE_CATEGORY, "(?i)rust")
            .with(names::EXCLUDE_OLDER, "7");
        let sink = CollectingSink::new();
        let item = FeedItem::new("Sponsored post", "body")
            .with_categories(["Rust"])
            .with_published("Fri, 01 Mar 2024 12:00:00 +0000");

        let verdict = fixed_pipeline().evaluate(&options, &item, &sink);

        assert!(verdict.skip());
        assert_eq!(verdict.skipped_by(), vec!["text", "age"]);
        assert_eq!(verdict.decision("category"), Some(false));
        assert_eq!(verdict.decision("missing"), None);
    }

    #[test]
    fn test_no_options_keeps_everything() {
        let options = FilterOptions::new();
        let sink = CollectingSink::new();
        let item = FeedItem::new("Anything", "<p>at all</p>")
            .with_categories(["Sports"])
            .with_published("not a date");

        assert!(!fixed_pipeline().evaluate(&options, &item, &sink).skip());
        assert!(!should_skip(&options, &item, &sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_filter_items_preserves_order() {
        let options = FilterOptions::new().with(names::EXCLUDE, "drop");
        let sink = CollectingSink::new();
        let items: Vec<FeedItem> = (0..50)
            .map(|i| {
                let content = if i % 3 == 0 { "drop me" } else { "keep me" };
                FeedItem::new(format!("item {i}"), content)
            })
            .collect();

        let kept = fixed_pipeline().filter_items(&options, items, &sink);

        let titles: Vec<String> = kept.iter().map(|item| item.title.clone()).collect();
        let expected: Vec<String> = (0..50)
            .filter(|i| i % 3 != 0)
            .map(|i| format!("item {i}"))
            .collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_filter_items_warns_once_per_batch() {
        let options = FilterOptions::new()
            .with(names::EXCLUDE, "[invalid")
            .with(names::EXCLUDE_OLDER, "soon");
        let sink = CollectingSink::new();
        let items: Vec<FeedItem> = (0..20)
            .map(|i| FeedItem::new(format!("item {i}"), "[invalid"))
            .collect();

        let kept = fixed_pipeline().filter_items(&options, items, &sink);

        assert_eq!(kept.len(), 20);
        assert_eq!(sink.warnings().len(), 2);
    }

    #[test]
    fn test_evaluate_compiled_reuses_options() {
        let options = FilterOptions::new().with(names::INCLUDE_TITLE, "(?i)rust(");
        let sink = CollectingSink::new();
        let compiled = CompiledOptions::compile(&options, &sink);
        let pipeline = fixed_pipeline();

        for title in ["Rust 1.80", "Go 1.22", "rust("] {
            let verdict = pipeline.evaluate_compiled(&compiled, &FeedItem::new(title, ""), &sink);
            assert_eq!(verdict.skipped_by(), vec!["text"]);
        }
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_should_skip_combines_families() {
        let options = FilterOptions::new()
            .with(names::EXCLUDE_CATEGORY, "(?i)sports")
            .with(names::EXCLUDE_OLDER, "1");
        let sink = CollectingSink::new();
        let recent = (Utc::now() - Duration::hours(2)).to_rfc2822();

        let sports = FeedItem::new("Match report", "")
            .with_categories(["Sports"])
            .with_published(recent.clone());
        let news = FeedItem::new("Election", "")
            .with_categories(["News"])
            .with_published(recent);

        assert!(should_skip(&options, &sports, &sink));
        assert!(!should_skip(&options, &news, &sink));
    }
}

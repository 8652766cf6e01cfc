//! Rule families for item filtering.
//!
//! A feed's options are compiled once per pass into [`CompiledOptions`];
//! degraded options (bad patterns, bad thresholds) are reported to the
//! caller's sink at that point, once, and every item then reuses the result.

pub mod age;
pub mod category;
pub mod text;

// Re-export for convenience
pub use age::{
    parse_timestamp, should_skip_older, should_skip_older_at, AgeRule, AgeThresholds, Clock,
    FixedClock, SystemClock,
};
pub use category::{should_skip_category, CategoryPatterns, CategoryRule};
pub use text::{should_skip_text, TextPatterns, TextRule};

use crate::diagnostics::DiagnosticSink;
use feed_config::FilterOptions;
use regex::Regex;

/// The patterns declared under one option name.
///
/// Malformed patterns are dropped at compile time but still count as
/// declared, so an include option made only of bad patterns stays active
/// and matches nothing.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    declared: usize,
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile every value under `name`, in declaration order.
    pub fn compile(options: &FilterOptions, name: &str, sink: &dyn DiagnosticSink) -> Self {
        let values = options.values_for(name);
        let patterns = values
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    sink.warn(&format!(
                        "ignoring invalid {name} pattern {pattern:?}: {err}"
                    ));
                    None
                }
            })
            .collect();

        Self {
            declared: values.len(),
            patterns,
        }
    }

    /// True if the option was declared at all, valid or not.
    pub fn is_declared(&self) -> bool {
        self.declared > 0
    }

    /// First pattern that matches any of `haystacks`, as written.
    ///
    /// Search is unanchored unless the pattern anchors itself.
    pub fn first_match(&self, haystacks: &[&str]) -> Option<&str> {
        self.patterns
            .iter()
            .find(|regex| haystacks.iter().any(|haystack| regex.is_match(haystack)))
            .map(Regex::as_str)
    }
}

/// A feed's filter options, compiled once for a whole pass.
#[derive(Debug, Clone, Default)]
pub struct CompiledOptions {
    pub text: TextPatterns,
    pub category: CategoryPatterns,
    pub age: AgeThresholds,
}

impl CompiledOptions {
    /// Compile every rule family's options, reporting malformed ones.
    pub fn compile(options: &FilterOptions, sink: &dyn DiagnosticSink) -> Self {
        Self {
            text: TextPatterns::compile(options, sink),
            category: CategoryPatterns::compile(options, sink),
            age: AgeThresholds::compile(options, sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[test]
    fn test_first_match_in_declaration_order() {
        let options = FilterOptions::new()
            .with("exclude", "bar")
            .with("exclude", "foo");
        let sink = CollectingSink::new();

        let set = PatternSet::compile(&options, "exclude", &sink);

        assert_eq!(set.first_match(&["foo and bar"]), Some("bar"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_malformed_pattern_dropped_but_declared() {
        let options = FilterOptions::new()
            .with("exclude", "(unclosed")
            .with("exclude", "foo");
        let sink = CollectingSink::new();

        let set = PatternSet::compile(&options, "exclude", &sink);

        assert!(set.is_declared());
        assert_eq!(set.first_match(&["foo"]), Some("foo"));
        assert_eq!(set.first_match(&["(unclosed"]), None);
        assert_eq!(sink.warnings().len(), 1);
        assert!(sink.warnings()[0].contains("(unclosed"));
    }

    #[test]
    fn test_only_malformed_patterns_stay_declared() {
        let options = FilterOptions::new().with("include", "[invalid");
        let sink = CollectingSink::new();

        let set = PatternSet::compile(&options, "include", &sink);

        assert!(set.is_declared());
        assert_eq!(set.first_match(&["[invalid", "anything"]), None);
    }

    #[test]
    fn test_undeclared_name_is_empty() {
        let sink = CollectingSink::new();
        let set = PatternSet::compile(&FilterOptions::new(), "include", &sink);

        assert!(!set.is_declared());
        assert_eq!(set.first_match(&["anything"]), None);
    }

    #[test]
    fn test_search_is_unanchored() {
        let options = FilterOptions::new().with("exclude", "bar");
        let set = PatternSet::compile(&options, "exclude", &CollectingSink::new());

        assert!(set.first_match(&["foo, bar baz"]).is_some());
    }

    #[test]
    fn test_anchored_pattern_respected() {
        let options = FilterOptions::new().with("exclude", "^bar$");
        let set = PatternSet::compile(&options, "exclude", &CollectingSink::new());

        assert!(set.first_match(&["foo, bar baz"]).is_none());
        assert!(set.first_match(&["bar"]).is_some());
    }

    #[test]
    fn test_compile_warns_once_per_malformed_option() {
        let options = FilterOptions::new()
            .with("exclude", "[invalid")
            .with("include-category", "(")
            .with("exclude-older", "soon")
            .with("exclude-title", "fine");
        let sink = CollectingSink::new();

        let compiled = CompiledOptions::compile(&options, &sink);

        assert_eq!(sink.warnings().len(), 3);
        assert!(compiled.category.include.is_declared());
        assert!(compiled.age.is_empty());
    }
}

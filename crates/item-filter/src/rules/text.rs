//! Title and content rules.
//!
//! `exclude` / `exclude-title` drop items whose content / title match.
//! Declaring any `include` or `include-title` switches the feed to
//! mandatory-include: an item must then match at least one of them.

use super::{CompiledOptions, PatternSet};
use crate::diagnostics::DiagnosticSink;
use crate::traits::Rule;
use feed_config::{names, FeedItem, FilterOptions};

/// Compiled `exclude`, `exclude-title`, `include` and `include-title` patterns.
#[derive(Debug, Clone, Default)]
pub struct TextPatterns {
    pub exclude: PatternSet,
    pub exclude_title: PatternSet,
    pub include: PatternSet,
    pub include_title: PatternSet,
}

impl TextPatterns {
    pub fn compile(options: &FilterOptions, sink: &dyn DiagnosticSink) -> Self {
        Self {
            exclude: PatternSet::compile(options, names::EXCLUDE, sink),
            exclude_title: PatternSet::compile(options, names::EXCLUDE_TITLE, sink),
            include: PatternSet::compile(options, names::INCLUDE, sink),
            include_title: PatternSet::compile(options, names::INCLUDE_TITLE, sink),
        }
    }

    /// Decide whether an item should be skipped on its title and content.
    ///
    /// ## Algorithm
    /// 1. Any `exclude` pattern matching `content` skips
    /// 2. Any `exclude-title` pattern matching `title` skips
    /// 3. With no include options, keep
    /// 4. Otherwise keep only if an `include` pattern matches `content` or an
    ///    `include-title` pattern matches `title`
    ///
    /// Excludes are checked first, so an exclude hit wins over any include.
    pub fn skips(&self, title: &str, content: &str, sink: &dyn DiagnosticSink) -> bool {
        if let Some(pattern) = self.exclude.first_match(&[content]) {
            sink.debug(&format!("content matches exclude pattern {pattern:?}"));
            return true;
        }

        if let Some(pattern) = self.exclude_title.first_match(&[title]) {
            sink.debug(&format!("title {title:?} matches exclude-title pattern {pattern:?}"));
            return true;
        }

        if !self.include.is_declared() && !self.include_title.is_declared() {
            return false;
        }

        let included = self.include.first_match(&[content]).is_some()
            || self.include_title.first_match(&[title]).is_some();
        if !included {
            sink.debug(&format!("title {title:?} matches no include or include-title pattern"));
        }
        !included
    }
}

/// One-shot form of [`TextPatterns::skips`] that compiles `options` first.
pub fn should_skip_text(
    options: &FilterOptions,
    title: &str,
    content: &str,
    sink: &dyn DiagnosticSink,
) -> bool {
    TextPatterns::compile(options, sink).skips(title, content, sink)
}

/// [`Rule`] over an item's title and content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRule;

impl Rule for TextRule {
    fn name(&self) -> &str {
        "text"
    }

    fn should_skip(
        &self,
        options: &CompiledOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        options.text.skips(&item.title, &item.content, sink)
    }
}

//! Category rules.
//!
//! Same exclude/include duality as the text rules, matched against each of
//! the item's categories instead of its title or content.

use super::{CompiledOptions, PatternSet};
use crate::diagnostics::DiagnosticSink;
use crate::traits::Rule;
use feed_config::{names, FeedItem, FilterOptions};

/// Compiled `exclude-category` and `include-category` patterns.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatterns {
    pub exclude: PatternSet,
    pub include: PatternSet,
}

impl CategoryPatterns {
    pub fn compile(options: &FilterOptions, sink: &dyn DiagnosticSink) -> Self {
        Self {
            exclude: PatternSet::compile(options, names::EXCLUDE_CATEGORY, sink),
            include: PatternSet::compile(options, names::INCLUDE_CATEGORY, sink),
        }
    }

    /// Decide whether an item should be skipped on its categories.
    ///
    /// ## Algorithm
    /// 1. Any `exclude-category` pattern matching any category skips
    /// 2. With no `include-category` options, keep
    /// 3. Otherwise keep only if some category matches some `include-category`
    ///
    /// An item without categories can never satisfy an include, so it is
    /// skipped whenever `include-category` is declared.
    pub fn skips<S: AsRef<str>>(&self, categories: &[S], sink: &dyn DiagnosticSink) -> bool {
        let categories: Vec<&str> = categories.iter().map(|category| category.as_ref()).collect();

        if let Some(pattern) = self.exclude.first_match(&categories) {
            sink.debug(&format!(
                "categories {categories:?} match exclude-category pattern {pattern:?}"
            ));
            return true;
        }

        if !self.include.is_declared() {
            return false;
        }

        let included = self.include.first_match(&categories).is_some();
        if !included {
            sink.debug(&format!(
                "categories {categories:?} match no include-category pattern"
            ));
        }
        !included
    }
}

/// One-shot form of [`CategoryPatterns::skips`] that compiles `options` first.
pub fn should_skip_category<S: AsRef<str>>(
    options: &FilterOptions,
    categories: &[S],
    sink: &dyn DiagnosticSink,
) -> bool {
    CategoryPatterns::compile(options, sink).skips(categories, sink)
}

/// [`Rule`] over an item's categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRule;

impl Rule for CategoryRule {
    fn name(&self) -> &str {
        "category"
    }

    fn should_skip(
        &self,
        options: &CompiledOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        options.category.skips(&item.categories, sink)
    }
}

//! Core traits for the rule pipeline.
//!
//! Each rule family implements [`Rule`] so the pipeline can run them
//! side by side and report a decision per family.

use crate::diagnostics::DiagnosticSink;
use crate::rules::CompiledOptions;
use feed_config::FeedItem;

/// A single rule family.
///
/// ## Design Note
/// - `Send + Sync` so one pipeline can evaluate many items in parallel
/// - Rules are infallible: a rule that cannot evaluate its options reports
///   through the sink and answers "keep"
pub trait Rule: Send + Sync {
    /// Returns the name of this rule (for logging/debugging)
    fn name(&self) -> &str;

    /// Decide whether `item` should be suppressed.
    ///
    /// # Arguments
    /// * `options` - The feed's options, compiled once for the pass
    /// * `item` - The candidate item
    /// * `sink` - Where degraded-rule diagnostics go
    ///
    /// # Returns
    /// `true` to skip the item, `false` to keep it
    fn should_skip(
        &self,
        options: &CompiledOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> bool;
}

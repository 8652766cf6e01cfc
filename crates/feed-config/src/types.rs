//! Core domain types for feed configuration and candidate items.
//!
//! A feed carries an ordered list of `name: value` options. Names are not
//! unique, so the list is kept as an association list rather than a map;
//! declaration order is what diagnostics are reported in.

use serde::{Deserialize, Serialize};

// =============================================================================
// Option names
// =============================================================================

/// Names of the options the filtering engine understands.
pub mod names {
    /// Regex matched against item content; a match skips the item.
    pub const EXCLUDE: &str = "exclude";
    /// Regex matched against item title; a match skips the item.
    pub const EXCLUDE_TITLE: &str = "exclude-title";
    /// Regex matched against item content; items must match some include.
    pub const INCLUDE: &str = "include";
    /// Regex matched against item title; items must match some include.
    pub const INCLUDE_TITLE: &str = "include-title";
    /// Regex matched against each category; any match skips the item.
    pub const EXCLUDE_CATEGORY: &str = "exclude-category";
    /// Regex matched against each category; some category must match.
    pub const INCLUDE_CATEGORY: &str = "include-category";
    /// Maximum item age in whole days.
    pub const EXCLUDE_OLDER: &str = "exclude-older";

    /// Every filter option name, in the order they are documented.
    pub const RECOGNIZED: [&str; 7] = [
        EXCLUDE,
        EXCLUDE_TITLE,
        INCLUDE,
        INCLUDE_TITLE,
        EXCLUDE_CATEGORY,
        INCLUDE_CATEGORY,
        EXCLUDE_OLDER,
    ];

    /// True if the engine acts on options with this name.
    pub fn is_recognized(name: &str) -> bool {
        RECOGNIZED.contains(&name)
    }
}

// =============================================================================
// Options
// =============================================================================

/// A single `name: value` pair attached to a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOption {
    pub name: String,
    pub value: String,
}

impl FeedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered option list for one feed.
///
/// Immutable while a filtering pass runs; rules only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterOptions {
    entries: Vec<FeedOption>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option (builder pattern).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(FeedOption::new(name, value));
    }

    /// Every value stored under `name`, in declaration order.
    ///
    /// The name match is exact and case-sensitive. A name that was never
    /// declared yields an empty vector.
    pub fn values_for(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|option| option.name == name)
            .map(|option| option.value.as_str())
            .collect()
    }

    /// True if at least one option named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|option| option.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedOption> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for FilterOptions
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| FeedOption::new(name, value))
                .collect(),
        }
    }
}

// =============================================================================
// Feeds and items
// =============================================================================

/// A feed entry from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    pub options: FilterOptions,
}

impl Feed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: FilterOptions::new(),
        }
    }

    /// Options the filtering engine acts on, in declaration order.
    ///
    /// Other options (retry counts, templates and so on) stay in `options`
    /// for whoever else reads the configuration.
    pub fn recognized_options(&self) -> Vec<&FeedOption> {
        self.options
            .iter()
            .filter(|option| names::is_recognized(&option.name))
            .collect()
    }
}

/// Every feed in a configuration file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    feeds: Vec<Feed>,
}

impl FeedConfig {
    pub fn new(feeds: Vec<Feed>) -> Self {
        Self { feeds }
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    /// Look up a feed by its exact URL.
    pub fn feed(&self, url: &str) -> Option<&Feed> {
        self.feeds.iter().find(|feed| feed.url == url)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

/// The per-item facts the engine looks at.
///
/// Fields are taken verbatim from the feed parser; nothing here is validated.
/// Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    pub title: String,
    /// Body content, possibly HTML.
    pub content: String,
    pub categories: Vec<String>,
    /// Published timestamp as the feed supplied it.
    pub published: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }
}

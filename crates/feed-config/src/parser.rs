//! Parser for feed configuration files.
//!
//! Format, one entry per line:
//!
//! ```text
//! # comments start with a hash
//! https://example.com/feed.xml
//!  - exclude-title: (?i)sponsored
//!  - include-category: rust
//! https://example.org/atom.xml
//! ```
//!
//! A line whose trimmed form starts with `-` is an option for the most recent
//! feed. Only the first `:` separates the name from the value, so patterns
//! and URLs in values survive intact.

use crate::error::{ConfigError, Result};
use crate::types::{Feed, FeedConfig};
use std::fs;
use std::path::Path;

impl FeedConfig {
    /// Read and parse a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        parse_config(&text, &file)
    }

    /// Like [`FeedConfig::feed`], but a missing feed is an error.
    pub fn require_feed(&self, url: &str) -> Result<&Feed> {
        self.feed(url).ok_or_else(|| ConfigError::FeedNotFound {
            url: url.to_string(),
        })
    }
}

/// Parse configuration text.
///
/// `file` is only used to label errors.
pub fn parse_config(text: &str, file: &str) -> Result<FeedConfig> {
    let mut feeds: Vec<Feed> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        match line_trimmed.strip_prefix('-') {
            Some(option) => {
                let (name, value) = parse_option(option, file, line_no)?;
                let feed = feeds
                    .last_mut()
                    .ok_or_else(|| ConfigError::OptionBeforeFeed {
                        file: file.to_string(),
                        line: line_no,
                    })?;
                feed.options.push(name, value);
            }
            None => feeds.push(Feed::new(line_trimmed)),
        }
    }

    Ok(FeedConfig::new(feeds))
}

/// Split `name: value` (the leading `-` already removed).
fn parse_option<'a>(option: &'a str, file: &str, line_no: usize) -> Result<(&'a str, &'a str)> {
    let (name, value) = option
        .split_once(':')
        .ok_or_else(|| ConfigError::Parse {
            file: file.to_string(),
            line: line_no,
            reason: "Option is missing ':' separator".to_string(),
        })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::Parse {
            file: file.to_string(),
            line: line_no,
            reason: "Option name is empty".to_string(),
        });
    }

    Ok((name, value.trim()))
}

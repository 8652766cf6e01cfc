//! Error types for the feed-config crate.
//!
//! Only loading a configuration file can fail. Filtering never does: the
//! engine absorbs bad patterns and dates itself and always returns a decision.

use thiserror::Error;

/// Errors that can occur while reading a feed configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in the configuration couldn't be understood
    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// An option line appeared before any feed URL
    #[error("Option at line {line} in {file} does not follow a feed URL")]
    OptionBeforeFeed { file: String, line: usize },

    /// A feed was requested that the configuration does not list
    #[error("Feed not found in configuration: {url}")]
    FeedNotFound { url: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ConfigError>;

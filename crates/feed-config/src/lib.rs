//! # Feed Config Crate
//!
//! Domain types shared by the filtering engine and its callers.
//!
//! ## Main Components
//!
//! - **types**: `FeedOption`, `FilterOptions`, `Feed`, `FeedConfig`, `FeedItem`
//!   and the recognized option names
//! - **parser**: read the plain-text feed configuration format
//! - **error**: error types for configuration loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use feed_config::FeedConfig;
//! use std::path::Path;
//!
//! let config = FeedConfig::load_from_file(Path::new("feeds.txt"))?;
//! let feed = config.require_feed("https://example.com/feed.xml")?;
//!
//! for pattern in feed.options.values_for("exclude-title") {
//!     println!("excluding titles matching {pattern}");
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;

pub use error::{ConfigError, Result};
pub use parser::parse_config;
pub use types::{names, Feed, FeedConfig, FeedItem, FeedOption, FilterOptions};

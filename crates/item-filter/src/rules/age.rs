//! Age rule.
//!
//! Skips items older than the feed's `exclude-older` threshold (whole days).
//! Both the threshold and the item's published date come from outside, so
//! either being unreadable turns the rule off for that item.

use super::CompiledOptions;
use crate::diagnostics::DiagnosticSink;
use crate::traits::Rule;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use feed_config::{names, FeedItem, FilterOptions};

/// Timestamp layouts accepted for published dates, tried in order.
enum Layout {
    /// RFC 2822 / RFC 1123, numeric zone or GMT/UT/US zone names.
    Rfc2822,
    /// RFC 3339 / ISO 8601 with an offset.
    Rfc3339,
    /// Explicit format ending in a numeric offset.
    Offset(&'static str),
    /// No usable offset; the time is read as UTC.
    NaiveUtc(&'static str),
    /// Trailing zone abbreviation (`CEST`, `JST`, ...) dropped; the time
    /// is read as UTC.
    ZoneNameUtc(&'static str),
}

const LAYOUTS: [Layout; 5] = [
    Layout::Rfc2822,
    Layout::ZoneNameUtc("%a, %d %b %Y %H:%M:%S"),
    Layout::Rfc3339,
    Layout::NaiveUtc("%Y-%m-%dT%H:%M:%S%.f"),
    Layout::NaiveUtc("%Y-%m-%d %H:%M:%S%.f"),
];

/// Tried after the weekday prefix is removed, for dates whose weekday
/// disagrees with the day of month.
const WITHOUT_WEEKDAY: [Layout; 2] = [
    Layout::Offset("%d %b %Y %H:%M:%S %z"),
    Layout::ZoneNameUtc("%d %b %Y %H:%M:%S"),
];

impl Layout {
    fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            Layout::Rfc2822 => DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            Layout::Offset(format) => DateTime::parse_from_str(value, format)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            Layout::NaiveUtc(format) => NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(|parsed| parsed.and_utc()),
            Layout::ZoneNameUtc(format) => {
                let (rest, zone) = value.rsplit_once(' ')?;
                if zone.is_empty() || !zone.bytes().all(|b| b.is_ascii_alphabetic()) {
                    return None;
                }
                NaiveDateTime::parse_from_str(rest.trim_end(), format)
                    .ok()
                    .map(|parsed| parsed.and_utc())
            }
        }
    }
}

/// `"Sun, 19 Oct ..."` -> `"19 Oct ..."`; input without a weekday is returned as is.
fn strip_weekday(value: &str) -> &str {
    match value.split_once(',') {
        Some((day, rest)) if day.len() == 3 && day.bytes().all(|b| b.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => value,
    }
}

/// Parse a feed-supplied published timestamp.
///
/// Returns `None` if no known layout fits.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(value))
        .or_else(|| {
            let rest = strip_weekday(value);
            WITHOUT_WEEKDAY.iter().find_map(|layout| layout.parse(rest))
        })
}

/// Source of "now" for the age rule.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Valid `exclude-older` thresholds, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AgeThresholds {
    days: Vec<u32>,
}

impl AgeThresholds {
    /// Read every `exclude-older` value.
    ///
    /// Each must be a non-negative whole number of days; others are
    /// reported and ignored.
    pub fn compile(options: &FilterOptions, sink: &dyn DiagnosticSink) -> Self {
        let days = options
            .values_for(names::EXCLUDE_OLDER)
            .into_iter()
            .filter_map(|value| parse_threshold(value, sink))
            .collect();
        Self { days }
    }

    /// True if no usable threshold was declared.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Decide whether an item is too old, measured against `now`.
    ///
    /// ## Algorithm
    /// 1. No valid threshold means keep
    /// 2. Parse `published`; if no layout fits, report and keep
    /// 3. Skip if the item's age exceeds any threshold
    pub fn skips_at(&self, published: &str, now: DateTime<Utc>, sink: &dyn DiagnosticSink) -> bool {
        if self.days.is_empty() {
            return false;
        }

        let Some(published_at) = parse_timestamp(published) else {
            sink.warn(&format!(
                "cannot parse published date {published:?}, keeping item"
            ));
            return false;
        };

        let age = now.signed_duration_since(published_at);
        match self
            .days
            .iter()
            .find(|days| age > Duration::days(i64::from(**days)))
        {
            Some(days) => {
                sink.debug(&format!(
                    "published {published:?} is older than {days} day(s)"
                ));
                true
            }
            None => false,
        }
    }
}

fn parse_threshold(value: &str, sink: &dyn DiagnosticSink) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(days) => Some(days),
        Err(err) => {
            sink.warn(&format!(
                "ignoring {} value {value:?}: {err}",
                names::EXCLUDE_OLDER
            ));
            None
        }
    }
}

/// Decide whether an item is too old, measured against the system clock.
pub fn should_skip_older(
    options: &FilterOptions,
    published: &str,
    sink: &dyn DiagnosticSink,
) -> bool {
    should_skip_older_at(options, published, Utc::now(), sink)
}

/// One-shot form of [`AgeThresholds::skips_at`] that reads `options` first.
pub fn should_skip_older_at(
    options: &FilterOptions,
    published: &str,
    now: DateTime<Utc>,
    sink: &dyn DiagnosticSink,
) -> bool {
    AgeThresholds::compile(options, sink).skips_at(published, now, sink)
}

/// [`Rule`] over an item's published date.
pub struct AgeRule {
    clock: Box<dyn Clock>,
}

impl AgeRule {
    /// Age rule measured against the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }
}

impl Default for AgeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AgeRule {
    fn name(&self) -> &str {
        "age"
    }

    fn should_skip(
        &self,
        options: &CompiledOptions,
        item: &FeedItem,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        options.age.skips_at(&item.published, self.clock.now(), sink)
    }
}

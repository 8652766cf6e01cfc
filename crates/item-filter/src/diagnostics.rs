//! Diagnostic sinks for rule evaluation.
//!
//! Rules never touch a global logger. Whoever runs them passes a sink, and
//! every degraded rule (bad pattern, bad threshold, unreadable date) reports
//! through it before carrying on with its fail-open default.

use std::sync::{Mutex, PoisonError};

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Warn,
}

/// One recorded diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Destination for diagnostics produced while filtering.
///
/// `Send + Sync` because items may be evaluated on several threads at once
/// against the same sink.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::Warn => tracing::warn!("{}", message),
            Level::Debug => tracing::debug!("{}", message),
        }
    }
}

/// Keeps every diagnostic in memory, in the order it was emitted.
#[derive(Debug, Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at warning level.
    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics()
            .into_iter()
            .filter(|diagnostic| diagnostic.level == Level::Warn)
            .map(|diagnostic| diagnostic.message)
            .collect()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                level,
                message: message.to_string(),
            });
    }
}

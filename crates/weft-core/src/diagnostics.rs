//! Leveled diagnostic sinks.
//!
//! The engine reports internal events (cell insertion, behaviour attach,
//! state transitions, teardown) to an explicitly passed
//! [`DiagnosticSink`]. There is no process-wide logger: a mesh built
//! without a sink uses [`NullSink`], and the presence or absence of a sink
//! never changes engine semantics.
//!
//! [`TracingSink`] bridges to the `tracing` ecosystem. [`Filtered`] and
//! [`Fanout`] compose sinks with per-sink minimum levels.

use std::fmt;
use std::sync::Arc;

/// Severity of a diagnostic event.
///
/// Discriminants leave room between levels so external code can reason
/// about thresholds numerically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Fine-grained engine tracing.
    Debug = 10,
    /// Notable but expected events.
    Info = 20,
    /// Something unusual that does not stop the engine.
    Warning = 30,
    /// An operation failed.
    Error = 40,
    /// The engine cannot continue.
    Critical = 50,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// A destination for diagnostic events.
///
/// `Send + Sync` so a mesh holding an `Arc<dyn DiagnosticSink>` can be
/// handed to another thread by an external driver.
pub trait DiagnosticSink: Send + Sync {
    /// Whether events at `level` would be recorded. Emitters check this
    /// before formatting anything expensive.
    fn enabled(&self, level: Level) -> bool {
        let _ = level;
        true
    }

    /// Record one event.
    fn emit(&self, level: Level, message: fmt::Arguments<'_>);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn emit(&self, _level: Level, _message: fmt::Arguments<'_>) {}
}

/// Forwards events to the `tracing` macros.
///
/// [`Level::Critical`] has no `tracing` counterpart and is reported as
/// `ERROR`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(tracing::Level::INFO),
            Level::Warning => tracing::enabled!(tracing::Level::WARN),
            Level::Error | Level::Critical => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        match level {
            Level::Debug => tracing::debug!("{message}"),
            Level::Info => tracing::info!("{message}"),
            Level::Warning => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
            Level::Critical => tracing::error!(critical = true, "{message}"),
        }
    }
}

/// Passes events at or above a minimum level to the inner sink.
#[derive(Clone, Debug)]
pub struct Filtered<S> {
    inner: S,
    min: Level,
}

impl<S> Filtered<S> {
    /// Wrap `inner`, dropping events below `min`.
    pub fn new(inner: S, min: Level) -> Self {
        Self { inner, min }
    }

    /// The current threshold.
    pub fn level(&self) -> Level {
        self.min
    }

    /// Change the threshold.
    pub fn set_level(&mut self, min: Level) {
        self.min = min;
    }

    /// The wrapped sink.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for Filtered<S> {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min && self.inner.enabled(level)
    }

    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        if level >= self.min {
            self.inner.emit(level, message);
        }
    }
}

/// Dispatches each event to an ordered list of handler sinks.
///
/// The fan-out has its own threshold, checked before any handler; each
/// handler then applies its own `enabled` check.
#[derive(Clone)]
pub struct Fanout {
    min: Level,
    handlers: Vec<Arc<dyn DiagnosticSink>>,
}

impl Fanout {
    /// An empty fan-out passing events at or above `min`.
    pub fn new(min: Level) -> Self {
        Self {
            min,
            handlers: Vec::new(),
        }
    }

    /// Append a handler.
    pub fn add(&mut self, handler: Arc<dyn DiagnosticSink>) {
        self.handlers.push(handler);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, handler: Arc<dyn DiagnosticSink>) -> Self {
        self.add(handler);
        self
    }

    /// Remove every registration of `handler` (compared by identity).
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, handler: &Arc<dyn DiagnosticSink>) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
        self.handlers.len() != before
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The fan-out threshold.
    pub fn level(&self) -> Level {
        self.min
    }

    /// Change the fan-out threshold.
    pub fn set_level(&mut self, min: Level) {
        self.min = min;
    }
}

impl fmt::Debug for Fanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fanout")
            .field("min", &self.min)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl DiagnosticSink for Fanout {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min && self.handlers.iter().any(|h| h.enabled(level))
    }

    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        if level < self.min {
            return;
        }
        for handler in &self.handlers {
            if handler.enabled(level) {
                handler.emit(level, message);
            }
        }
    }
}

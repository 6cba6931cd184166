//! Test utilities and fixture behaviours for Weft development.
//!
//! Provides a [`RecordingSink`] that captures diagnostics for assertions,
//! reusable fixture behaviours in [`fixtures`], and the two-pass generation
//! driver in [`driver`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod driver;
pub mod fixtures;

use std::fmt;
use std::sync::Mutex;

use weft_core::{DiagnosticSink, Level};

pub use driver::{run_generation, run_generations, run_mesh_generation};

/// A [`DiagnosticSink`] that stores every event it receives.
///
/// Events below the minimum level are reported as disabled and never
/// stored. Share it through an `Arc` and inspect it after the code under
/// test has run.
pub struct RecordingSink {
    min: Level,
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    /// Record everything from [`Level::Debug`] up.
    pub fn new() -> Self {
        Self::at_level(Level::Debug)
    }

    /// Record events at `min` or above.
    pub fn at_level(min: Level) -> Self {
        Self {
            min,
            records: Mutex::new(Vec::new()),
        }
    }

    /// All recorded `(level, message)` pairs, oldest first.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Recorded messages without their levels.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|(_, m)| m.contains(needle))
    }

    /// Number of recorded events at exactly `level`.
    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|(l, _)| *l == level).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        // A panicking test thread must not hide the records from the others.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for RecordingSink {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min
    }

    fn emit(&self, level: Level, message: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.lock().push((level, message.to_string()));
        }
    }
}

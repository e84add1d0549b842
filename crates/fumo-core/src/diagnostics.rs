//! # Diagnostics
//!
//! Where the remote repository sends the failures it swallows.
//!
//! `load`, `add` and `rm` never surface channel errors to their caller; they
//! hand a [`Diagnostic`] to a [`DiagnosticSink`] and return a harmless
//! default. The sink is injected so tests can look at what was reported.

use std::sync::Mutex;
use tracing::error;

use crate::channel::Command;

/// One suppressed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Command that failed.
    pub command: Command,
    /// What the repository was doing, e.g. "Error loading database data".
    pub context: String,
    /// Rendered error.
    pub error: String,
}

/// Receives suppressed failures.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Default sink: emits each diagnostic as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        error!(
            command = %diagnostic.command,
            error = %diagnostic.error,
            "{}",
            diagnostic.context
        );
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}

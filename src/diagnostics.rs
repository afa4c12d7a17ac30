//! Pluggable diagnostic output.
//!
//! The store never prints. Every notable event (default path picked, file
//! created, read/write failures, rejected input, confirmations) goes to a
//! [`DiagnosticSink`]. The default, [`TracingSink`], forwards to `tracing`;
//! install a subscriber in your binary to see it. [`MemorySink`] keeps
//! everything in a buffer, which is handy in tests.

use parking_lot::Mutex;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operation: confirmations, defaults picked.
    Info,
    /// The caller's request was rejected.
    Warn,
    /// Something failed on disk.
    Error,
}

/// Receiver for store diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message.
    fn emit(&self, severity: Severity, message: &str);
}

/// Forwards diagnostics to the `tracing` macros under the `product_store`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "product_store", "{message}"),
            Severity::Warn => tracing::warn!(target: "product_store", "{message}"),
            Severity::Error => tracing::error!(target: "product_store", "{message}"),
        }
    }
}

/// One buffered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity it was emitted with.
    pub severity: Severity,
    /// The message text.
    pub message: String,
}

/// Buffers diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// `true` if any recorded message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.lock().iter().any(|d| d.message.contains(needle))
    }

    /// Number of messages recorded at `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, severity: Severity, message: &str) {
        self.entries.lock().push(Diagnostic {
            severity,
            message: message.to_owned(),
        });
    }
}

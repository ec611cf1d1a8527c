#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Forwarding faultline diagnostics to [`tracing`].
//!
//! [`TracingSink`] is a root [`Sink`] that turns every log message and
//! exception reaching the end of a context chain into a `tracing` event with
//! target `faultline`. Whatever subscriber you already use decides how those
//! events are filtered and written.
//!
//! # Quick Start
//!
//! ```
//! use faultline_tracing::TracingSink;
//!
//! tracing_subscriber::fmt().init();
//! TracingSink::install();
//!
//! let free_bytes = 0;
//! faultline::log!(Error, "disk full", free_bytes);
//! ```
//!
//! Output:
//! ```text
//! 2025-11-02T10:14:03.512Z ERROR faultline: error: src/main.rs:8: disk full; free_bytes = 0 severity=error
//! ```
//!
//! # Levels
//!
//! | severity | level |
//! |---|---|
//! | `Debug` | `DEBUG` |
//! | `Info` | `INFO` |
//! | `Warning` | `WARN` |
//! | `Error`, `Fatal` | `ERROR` |
//!
//! Exceptions are always `ERROR` events, carrying `file`, `line`, `nature`
//! and `fatal` fields.

use faultline::{
    Exception, Severity,
    sink::{Sink, register_root_sink},
};

/// A root sink emitting `tracing` events.
///
/// # Examples
///
/// ```
/// use faultline::sink::register_root_sink;
/// use faultline_tracing::TracingSink;
///
/// register_root_sink(TracingSink);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Registers a [`TracingSink`] as the process-wide root sink.
    pub fn install() {
        register_root_sink(TracingSink);
    }
}

fn exception_event(exception: &Exception, fatal: bool) {
    tracing::error!(
        target: "faultline",
        file = exception.file(),
        line = exception.line(),
        nature = %exception.nature(),
        fatal,
        "{exception}"
    );
}

impl Sink for TracingSink {
    fn log_message(&self, severity: Severity, text: &str) {
        // Log lines arrive newline-terminated; events carry their own.
        let message = text.trim_end_matches('\n');
        match severity {
            Severity::Debug => {
                tracing::debug!(target: "faultline", severity = %severity, "{message}")
            }
            Severity::Info => {
                tracing::info!(target: "faultline", severity = %severity, "{message}")
            }
            Severity::Warning => {
                tracing::warn!(target: "faultline", severity = %severity, "{message}")
            }
            Severity::Error | Severity::Fatal => {
                tracing::error!(target: "faultline", severity = %severity, "{message}")
            }
        }
    }

    fn on_recoverable_exception(&self, exception: Exception) {
        exception_event(&exception, false);
    }

    fn on_fatal_exception(&self, exception: Exception) {
        exception_event(&exception, true);
    }
}

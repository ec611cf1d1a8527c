//! The terminal sink at the end of every context chain.
//!
//! Diagnostics travel from the innermost [`Context`](crate::Context) of the
//! current thread outward. Once they pass the outermost context they reach
//! the root sink, which is shared by all threads and decides what finally
//! happens to them: print them, forward them to a logging framework, or
//! anything else.
//!
//! Without a registered sink, [`StderrSink`] is used.
//!
//! # Examples
//!
//! ```rust
//! use faultline::{
//!     Exception, Severity,
//!     sink::{Sink, register_root_sink},
//! };
//!
//! struct Quiet;
//!
//! impl Sink for Quiet {
//!     fn log_message(&self, _severity: Severity, _text: &str) {}
//!
//!     fn on_recoverable_exception(&self, _exception: Exception) {}
//!
//!     fn on_fatal_exception(&self, exception: Exception) {
//!         eprintln!("fatal: {exception}");
//!     }
//! }
//!
//! register_root_sink(Quiet);
//! ```

mod stderr;

use spin::RwLock;
use triomphe::Arc;
use unsize::CoerceUnsize;

pub use self::stderr::StderrSink;
use crate::{exception::Exception, severity::Severity};

/// The final destination of log messages and exceptions.
///
/// A sink is the last line of defense, so its methods must not panic and
/// have no way to report a failure. Sinks are shared between threads.
pub trait Sink: 'static + Send + Sync {
    /// Receives a finished log line, including its trailing newline.
    fn log_message(&self, severity: Severity, text: &str);

    /// Receives an exception after which execution continues.
    fn on_recoverable_exception(&self, exception: Exception);

    /// Receives an exception after which the process terminates.
    ///
    /// The caller aborts the process once this returns.
    fn on_fatal_exception(&self, exception: Exception);
}

type Hook = Arc<dyn Sink>;

// Never poisoned: reporting must keep working after a panic elsewhere.
static ROOT_SINK: RwLock<Option<Hook>> = RwLock::new(None);

/// Registers the root sink for the whole process.
///
/// This replaces any previously registered sink. Diagnostics already being
/// delivered keep using the sink they started with.
pub fn register_root_sink(sink: impl Sink) {
    *ROOT_SINK.write() = Some(Arc::new(sink).unsize(unsize::Coercion!(to dyn Sink)));
}

/// Removes the registered root sink, falling back to [`StderrSink`].
pub fn reset_root_sink() {
    *ROOT_SINK.write() = None;
}

/// Runs `f` with the current root sink.
///
/// The lock is released before `f` runs, so a sink may itself register a
/// new root sink or log.
pub(crate) fn with_root_sink<R>(f: impl FnOnce(&dyn Sink) -> R) -> R {
    let hook = ROOT_SINK.read().clone();
    let sink = hook.as_deref().unwrap_or(const { &StderrSink });
    f(sink)
}

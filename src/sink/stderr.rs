use std::io::{self, Write};

use super::Sink;
use crate::{exception::Exception, severity::Severity};

/// A sink writing everything to standard error.
///
/// Log lines are written as they are. Exceptions are written as
/// `recoverable exception: ...` or `fatal exception: ...` followed by their
/// [`Display`](core::fmt::Display) form. Write errors are ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn log_message(&self, _severity: Severity, text: &str) {
        let _ = io::stderr().lock().write_all(text.as_bytes());
    }

    fn on_recoverable_exception(&self, exception: Exception) {
        let _ = writeln!(io::stderr().lock(), "recoverable exception: {exception}");
    }

    fn on_fatal_exception(&self, exception: Exception) {
        let _ = writeln!(io::stderr().lock(), "fatal exception: {exception}");
    }
}

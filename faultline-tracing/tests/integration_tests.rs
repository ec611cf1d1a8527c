//! Integration tests for the faultline-tracing crate.
//!
//! Events are captured with a `fmt` subscriber writing into a shared buffer,
//! installed as the thread's default so parallel tests do not interfere.

use std::{
    io,
    sync::{Arc, Mutex},
};

use faultline::{
    Durability, Exception, Nature, Origin, Severity,
    sink::{Sink, register_root_sink},
};
use faultline_tracing::TracingSink;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

fn exception() -> Exception {
    let mut exception = Exception::new(
        Nature::Regular,
        Durability::Permanent,
        Origin::new("src/parse.rs", 12),
        "expected n > 0; n = 0",
    );
    exception.wrap_context(Origin::new("src/load.rs", 40), "path = app.toml");
    exception
}

#[test]
fn test_log_levels_follow_severity() {
    let output = capture(|| {
        TracingSink.log_message(Severity::Debug, "debug: a.rs:1: d\n");
        TracingSink.log_message(Severity::Info, "info: a.rs:2: i\n");
        TracingSink.log_message(Severity::Warning, "warning: a.rs:3: w\n");
        TracingSink.log_message(Severity::Error, "error: a.rs:4: e\n");
        TracingSink.log_message(Severity::Fatal, "fatal: a.rs:5: f\n");
    });

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5, "{output}");
    assert!(lines[0].starts_with("DEBUG faultline: debug: a.rs:1: d"), "{output}");
    assert!(lines[1].starts_with(" INFO faultline: info: a.rs:2: i"), "{output}");
    assert!(lines[2].starts_with(" WARN faultline: warning: a.rs:3: w"), "{output}");
    assert!(lines[3].starts_with("ERROR faultline: error: a.rs:4: e"), "{output}");
    assert!(lines[4].starts_with("ERROR faultline: fatal: a.rs:5: f"), "{output}");
    assert!(lines[2].ends_with("severity=warning"), "{output}");
}

#[test]
fn test_exceptions_carry_fields() {
    let output = capture(|| {
        TracingSink.on_recoverable_exception(exception());
        TracingSink.on_fatal_exception(exception());
    });

    assert!(output.contains("src/load.rs:40: context: path = app.toml"), "{output}");
    assert!(output.contains("src/parse.rs:12: failed: expected n > 0; n = 0"), "{output}");
    assert!(output.contains("file=\"src/parse.rs\""), "{output}");
    assert!(output.contains("line=12"), "{output}");
    assert!(output.contains("nature=failed"), "{output}");
    assert!(output.contains("fatal=false"), "{output}");
    assert!(output.contains("fatal=true"), "{output}");
    assert_eq!(output.matches("ERROR faultline:").count(), 2, "{output}");
}

#[test]
fn test_registered_sink_receives_chain_output() {
    register_root_sink(TracingSink);

    let output = capture(|| {
        let free_bytes = 0;
        faultline::log!(Error, "disk full", free_bytes);

        let _context = faultline::context!("checking", free_bytes);
        let fault = faultline::check!(free_bytes > 0).unwrap_err();
        drop(fault);
    });

    assert!(output.contains("ERROR faultline: error: "), "{output}");
    assert!(output.contains("disk full; free_bytes = 0"), "{output}");
    assert!(output.contains("context: checking; free_bytes = 0"), "{output}");
    assert!(output.contains("failed: expected free_bytes > 0"), "{output}");
    assert!(output.contains("fatal=false"), "{output}");
}

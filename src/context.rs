//! Scoped interceptors that annotate diagnostics on their way out.
//!
//! Every thread has its own chain of [`ExceptionCallback`]s. Creating a
//! [`Context`] pushes a callback onto the current thread's chain; dropping
//! it pops the callback again, including when the scope is left by a panic.
//! Diagnostics are delivered to the most recently installed callback first,
//! which hands them on to its successor through [`Next`], until they reach
//! the process-wide root [`Sink`](crate::sink::Sink).
//!
//! ```text
//!  fault ──▶ innermost context ──▶ … ──▶ outermost context ──▶ root sink
//! ```
//!
//! # Ordering
//!
//! Contexts must be dropped in the reverse order of their creation. This is
//! what happens naturally when they are bound to local variables. Dropping
//! them in any other order (for example by moving one into a longer-lived
//! structure) is a precondition violation: it is caught by a debug assertion
//! and otherwise leaves the chain in an unspecified state.
//!
//! # Examples
//!
//! ```
//! use faultline::{Context, Origin, check};
//!
//! fn load(path: &str) {
//!     let _context = Context::annotate(Origin::new(file!(), line!()), format!("path = {path}"));
//!     let size = 0;
//!     // The reported exception carries a "path = ..." annotation.
//!     let _ = check!(size > 0, size);
//! }
//! # load("config.toml");
//! ```

use alloc::{rc::Rc, string::String, vec::Vec};
use core::{cell::RefCell, fmt, marker::PhantomData};

use crate::{
    exception::{Exception, Origin},
    severity::Severity,
    sink,
};

/// A link in a thread's context chain.
///
/// Every method receives the successor as [`Next`] and must eventually
/// forward to it, so diagnostics always reach the root sink. The default
/// implementations forward unchanged.
pub trait ExceptionCallback: 'static {
    /// Called for an exception after which execution continues.
    fn on_recoverable_exception(&self, exception: Exception, next: Next<'_>) {
        next.on_recoverable_exception(exception);
    }

    /// Called for an exception after which the process terminates.
    fn on_fatal_exception(&self, exception: Exception, next: Next<'_>) {
        next.on_fatal_exception(exception);
    }

    /// Called for a finished log line.
    fn log_message(&self, severity: Severity, text: &str, next: Next<'_>) {
        next.log_message(severity, text);
    }
}

thread_local! {
    static CHAIN: RefCell<Vec<Rc<dyn ExceptionCallback>>> = const { RefCell::new(Vec::new()) };
}

fn node_at(depth: usize) -> Option<Rc<dyn ExceptionCallback>> {
    let index = depth.checked_sub(1)?;
    // During thread teardown the chain may already be gone; fall through to
    // the root sink then.
    CHAIN
        .try_with(|chain| chain.borrow().get(index).cloned())
        .ok()
        .flatten()
}

/// The number of contexts installed on the current thread.
pub fn depth() -> usize {
    CHAIN.try_with(|chain| chain.borrow().len()).unwrap_or(0)
}

/// The rest of the chain below a callback.
///
/// A `Next` is only valid while the callback it was handed to runs.
#[derive(Copy, Clone)]
pub struct Next<'a> {
    depth: usize,
    _marker: PhantomData<(&'a (), *const ())>,
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("depth", &self.depth).finish()
    }
}

impl Next<'_> {
    fn at(depth: usize) -> Self {
        Self {
            depth,
            _marker: PhantomData,
        }
    }

    fn head() -> Self {
        Self::at(depth())
    }

    /// Returns `true` if the successor is the root sink.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Forwards a recoverable exception to the successor.
    pub fn on_recoverable_exception(self, exception: Exception) {
        match node_at(self.depth) {
            Some(node) => node.on_recoverable_exception(exception, Next::at(self.depth - 1)),
            None => sink::with_root_sink(|sink| sink.on_recoverable_exception(exception)),
        }
    }

    /// Forwards a fatal exception to the successor.
    pub fn on_fatal_exception(self, exception: Exception) {
        match node_at(self.depth) {
            Some(node) => node.on_fatal_exception(exception, Next::at(self.depth - 1)),
            None => sink::with_root_sink(|sink| sink.on_fatal_exception(exception)),
        }
    }

    /// Forwards a log line to the successor.
    pub fn log_message(self, severity: Severity, text: &str) {
        match node_at(self.depth) {
            Some(node) => node.log_message(severity, text, Next::at(self.depth - 1)),
            None => sink::with_root_sink(|sink| sink.log_message(severity, text)),
        }
    }
}

/// Delivers a log line to the current thread's chain.
pub fn log_message(severity: Severity, text: &str) {
    Next::head().log_message(severity, text);
}

/// Delivers a recoverable exception to the current thread's chain.
pub fn on_recoverable_exception(exception: Exception) {
    Next::head().on_recoverable_exception(exception);
}

/// Delivers a fatal exception to the current thread's chain.
///
/// This only reports the exception; terminating the process is up to the
/// caller (see [`Fault::fatal`](crate::Fault::fatal)).
pub fn on_fatal_exception(exception: Exception) {
    Next::head().on_fatal_exception(exception);
}

/// Annotates exceptions with a description produced on demand.
struct Annotation<F> {
    origin: Origin,
    describe: F,
}

impl<F> Annotation<F>
where
    F: Fn() -> String + 'static,
{
    fn add_to(&self, exception: &mut Exception) {
        exception.wrap_context(self.origin.clone(), (self.describe)());
    }
}

impl<F> ExceptionCallback for Annotation<F>
where
    F: Fn() -> String + 'static,
{
    fn on_recoverable_exception(&self, mut exception: Exception, next: Next<'_>) {
        self.add_to(&mut exception);
        next.on_recoverable_exception(exception);
    }

    fn on_fatal_exception(&self, mut exception: Exception, next: Next<'_>) {
        self.add_to(&mut exception);
        next.on_fatal_exception(exception);
    }
}

/// An installed [`ExceptionCallback`], removed again when dropped.
///
/// Contexts belong to the thread that created them and cannot be sent to
/// other threads.
#[must_use = "the context is removed from the chain as soon as it is dropped"]
pub struct Context {
    depth: usize,
    _not_send: PhantomData<Rc<()>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth).finish()
    }
}

impl Context {
    /// Installs `callback` as the head of the current thread's chain.
    ///
    /// The previous head becomes its successor.
    pub fn new(callback: impl ExceptionCallback) -> Self {
        Self::from_rc(Rc::new(callback))
    }

    /// Like [`new`](Self::new), for a callback that is already shared.
    pub fn from_rc(callback: Rc<dyn ExceptionCallback>) -> Self {
        let depth = CHAIN.with(|chain| {
            let mut chain = chain.borrow_mut();
            chain.push(callback);
            chain.len() - 1
        });
        Self {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Installs a context adding `description` to every exception passing
    /// through it.
    pub fn annotate(origin: Origin, description: impl Into<String>) -> Self {
        let description = description.into();
        Self::annotate_with(origin, move || description.clone())
    }

    /// Installs a context whose description is only produced when an
    /// exception actually passes through.
    pub fn annotate_with(origin: Origin, describe: impl Fn() -> String + 'static) -> Self {
        Self::new(Annotation { origin, describe })
    }

    /// The number of contexts that were installed before this one.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let _ = CHAIN.try_with(|chain| {
            let mut chain = chain.borrow_mut();
            debug_assert_eq!(
                chain.len(),
                self.depth + 1,
                "contexts must be dropped in reverse order of creation"
            );
            chain.truncate(self.depth);
        });
    }
}

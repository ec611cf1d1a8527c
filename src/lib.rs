#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Diagnostic logging, assertions and system call checks that describe
//! themselves.
//!
//! ## Overview
//!
//! Every macro in this crate captures the source text of its arguments next
//! to their values, so a failure explains itself without a debugger:
//!
//! ```
//! use faultline::check;
//!
//! let (len, capacity) = (9, 4);
//! let fault = check!(len <= capacity, "buffer overflow", len, capacity).unwrap_err();
//! let exception = fault.into_exception().unwrap();
//! assert_eq!(
//!     exception.description(),
//!     "expected len <= capacity; buffer overflow; len = 9; capacity = 4"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Severity**: log messages carry a [`Severity`]. Messages below the
//!   process-wide threshold are skipped without evaluating their arguments.
//!   See [`set_min_severity`] and [`config::init_from_env`].
//! - **Faults**: [`check!`], [`syscall!`] and [`fail!`] raise a [`Fault`]
//!   holding an [`Exception`]. Dropping the fault reports the exception as
//!   recoverable, [`Fault::fatal`] reports it as fatal and aborts, and
//!   [`Fault::into_exception`] hands it back to the caller instead.
//! - **Context**: every thread has a chain of [`ExceptionCallback`]s. A
//!   [`Context`] guard installs one for the duration of a scope; [`context!`]
//!   installs one that annotates every exception passing through it. Each
//!   callback decides whether to forward to the [`Next`] one.
//! - **Sinks**: at the end of every chain sits the process-wide root
//!   [`Sink`](sink::Sink), which writes to standard error unless another one
//!   is registered with [`sink::register_root_sink`].
//!
//! ## Ecosystem
//!
//! - **[`faultline-tracing`]**: a root sink forwarding everything to
//!   [`tracing`].
//!
//! For the argument tokenizer and description templates, see the
//! [`faultline-internals`] crate.
//!
//! [`faultline-tracing`]: https://docs.rs/faultline-tracing
//! [`tracing`]: https://docs.rs/tracing
//! [`faultline-internals`]: faultline_internals

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod context;
pub mod description;
pub mod exception;
pub mod fault;
pub mod log;
pub mod severity;
pub mod sink;

pub use self::{
    context::{Context, ExceptionCallback, Next},
    description::{DescriptionStyle, INTERRUPTED, build_description, os_error_number, os_error_text},
    exception::{ContextAnnotation, Durability, Exception, Nature, Origin},
    fault::{Fault, FaultConsumedError},
    severity::{ParseSeverityError, Severity, min_severity, set_min_severity, should_log},
};

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use alloc::string::{String, ToString};
    use core::fmt::Display;

    #[doc(hidden)]
    #[inline]
    pub fn render<T: Display + ?Sized>(value: &T) -> String {
        value.to_string()
    }

    /// Pins the element type, so that an empty argument list still infers.
    #[doc(hidden)]
    #[inline]
    pub fn values<const N: usize>(values: [String; N]) -> [String; N] {
        values
    }
}

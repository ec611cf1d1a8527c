//! Building human-readable descriptions of log calls and faults.
//!
//! A description pairs the rendered value of every argument with the source
//! text of the expression that produced it:
//!
//! ```
//! use faultline::{DescriptionStyle, build_description};
//!
//! let description = build_description(DescriptionStyle::Log, None, 0, "x, y", &["1", "2"]);
//! assert_eq!(description, "x = 1; y = 2");
//!
//! let description =
//!     build_description(DescriptionStyle::Assertion, Some("x > 0"), 0, "x", &["5"]);
//! assert_eq!(description, "expected x > 0; x = 5");
//! ```

use alloc::{format, string::String};
use std::io;

use faultline_internals::{
    args::split_arguments,
    assemble::{Head, assemble, strip_assignment},
};

use crate::{context, severity::Severity};

/// Returned by [`os_error_number`] when the call was interrupted and should
/// simply be retried.
///
/// Never pass this value to [`DescriptionStyle::Syscall`] descriptions.
pub const INTERRUPTED: i32 = -1;

/// Which template a description follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DescriptionStyle {
    /// The arguments only.
    Log,
    /// `expected <code>` followed by the arguments.
    Assertion,
    /// `<code>: <OS error text>` followed by the arguments.
    Syscall,
}

/// The error number of the last failed OS call on this thread.
///
/// Returns [`INTERRUPTED`] if the call was interrupted by a signal, and `0`
/// if the OS reports no error.
pub fn os_error_number() -> i32 {
    error_number_of(&io::Error::last_os_error())
}

fn error_number_of(error: &io::Error) -> i32 {
    if error.kind() == io::ErrorKind::Interrupted {
        INTERRUPTED
    } else {
        error.raw_os_error().unwrap_or(0)
    }
}

/// Runs `call` until it succeeds or fails with something other than
/// [`INTERRUPTED`].
///
/// A result is a failure when it is negative; `error_number` is then asked
/// for the cause, normally [`os_error_number`]. Returns the first
/// non-negative result, or the error number of the first failure that was
/// not an interruption. That error number may be `0` if the call failed
/// without setting one.
///
/// ```
/// use faultline::{INTERRUPTED, description::retry_interrupted};
///
/// let mut results = [-1, 7].into_iter();
/// let result = retry_interrupted(|| results.next().unwrap_or(-1), || INTERRUPTED);
/// assert_eq!(result, Ok(7));
/// ```
pub fn retry_interrupted<T>(
    mut call: impl FnMut() -> T,
    mut error_number: impl FnMut() -> i32,
) -> Result<T, i32>
where
    T: PartialOrd + From<i8>,
{
    loop {
        let result = call();
        if result >= T::from(0) {
            return Ok(result);
        }
        let error_number = error_number();
        if error_number != INTERRUPTED {
            return Err(error_number);
        }
    }
}

/// The human-readable text for an OS error number, e.g. `Bad file
/// descriptor` for `EBADF` on Linux.
pub fn os_error_text(error_number: i32) -> String {
    let mut text = io::Error::from_raw_os_error(error_number).to_string();
    let suffix = format!(" (os error {error_number})");
    if text.ends_with(&suffix) {
        text.truncate(text.len() - suffix.len());
    }
    text
}

/// Builds the description of a log call or fault.
///
/// - `style` selects the head of the description; see [`DescriptionStyle`].
/// - `code` is the source text of the failed condition or call. An
///   assertion without code is described like a log call. For syscalls a
///   leading assignment such as `n = ` is dropped.
/// - `error_number` is only used by [`DescriptionStyle::Syscall`].
/// - `arg_list` is the source text of the arguments, e.g. `"a, b + 1"`, and
///   `values` their rendered values, in the same order.
///
/// If `arg_list` does not split into `values.len()` arguments, a warning
/// is logged through the current context chain and the unmatched values are
/// shown without names.
pub fn build_description<V: AsRef<str>>(
    style: DescriptionStyle,
    code: Option<&str>,
    error_number: i32,
    arg_list: &str,
    values: &[V],
) -> String {
    let names = split_arguments(arg_list, values.len());
    if names.is_mismatch() {
        context::log_message(
            Severity::Warning,
            &format!(
                "{}:{}: failed to parse logging macro args into {} names: {}\n",
                file!(),
                line!(),
                values.len(),
                arg_list
            ),
        );
    }

    let error_text;
    let head = match (style, code) {
        (DescriptionStyle::Log, _) | (DescriptionStyle::Assertion, None) => Head::Log,
        (DescriptionStyle::Assertion, Some(code)) => Head::Expected { code },
        (DescriptionStyle::Syscall, code) => {
            debug_assert_ne!(
                error_number, INTERRUPTED,
                "interrupted calls must be retried, not described"
            );
            error_text = os_error_text(error_number);
            Head::Syscall {
                code: strip_assignment(code.unwrap_or("")),
                error_text: &error_text,
            }
        }
    };

    assemble(head, &names, values)
}

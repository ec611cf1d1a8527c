//! Assembly of description strings.
//!
//! A description is an optional head followed by the rendered arguments:
//!
//! ```text
//! x = 1; y = 2                              (log)
//! expected x > 0; x = 5                     (assertion)
//! read(fd, buf, len): Bad file descriptor   (syscall)
//! ```
//!
//! Downstream log consumers depend on this exact shape, so the separators
//! are fixed.

use alloc::string::String;

use crate::args::ArgumentNames;

const EXPECTED: &str = "expected ";
const SEP: &str = " = ";
const DELIM: &str = "; ";
const COLON: &str = ": ";

/// The text preceding the arguments of a description.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Head<'a> {
    /// No head; the first argument starts the description.
    Log,
    /// `expected <code>`.
    Expected {
        /// The source text of the condition that did not hold.
        code: &'a str,
    },
    /// `<code>: <error_text>`.
    Syscall {
        /// The source text of the call, with any assignment prefix removed.
        code: &'a str,
        /// The human-readable text of the OS error.
        error_text: &'a str,
    },
}

impl Head<'_> {
    fn len(&self) -> usize {
        match *self {
            Head::Log => 0,
            Head::Expected { code } => EXPECTED.len() + code.len(),
            Head::Syscall { code, error_text } => code.len() + COLON.len() + error_text.len(),
        }
    }

    fn write_to(&self, out: &mut String) {
        match *self {
            Head::Log => {}
            Head::Expected { code } => {
                out.push_str(EXPECTED);
                out.push_str(code);
            }
            Head::Syscall { code, error_text } => {
                out.push_str(code);
                out.push_str(COLON);
                out.push_str(error_text);
            }
        }
    }
}

/// Whether argument `name` is shown as `name = value` rather than `value`.
///
/// String literals are messages, not expressions, so they are shown bare.
#[inline]
fn shows_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('"')
}

/// Builds the description for `head` and the argument `values`.
///
/// `values[i]` is paired with `names.name(i)`. Every argument is preceded by
/// `"; "` except the first one of a [`Head::Log`] description.
///
/// The length of the result is computed up front so the string is allocated
/// exactly once.
///
/// # Examples
///
/// ```
/// use faultline_internals::{
///     args::split_arguments,
///     assemble::{Head, assemble},
/// };
///
/// let names = split_arguments("x", 1);
/// let description = assemble(Head::Expected { code: "x > 0" }, &names, &["5"]);
/// assert_eq!(description, "expected x > 0; x = 5");
/// ```
pub fn assemble<V: AsRef<str>>(head: Head<'_>, names: &ArgumentNames<'_>, values: &[V]) -> String {
    let leading_delim = !matches!(head, Head::Log);

    let mut total = head.len();
    for (i, value) in values.iter().enumerate() {
        if i > 0 || leading_delim {
            total += DELIM.len();
        }
        let name = names.name(i);
        if shows_name(name) {
            total += name.len() + SEP.len();
        }
        total += value.as_ref().len();
    }

    let mut result = String::with_capacity(total);
    head.write_to(&mut result);
    for (i, value) in values.iter().enumerate() {
        if i > 0 || leading_delim {
            result.push_str(DELIM);
        }
        let name = names.name(i);
        if shows_name(name) {
            result.push_str(name);
            result.push_str(SEP);
        }
        result.push_str(value.as_ref());
    }

    debug_assert_eq!(result.len(), total);
    result
}

/// Removes a leading assignment from the source text of a call.
///
/// Callers sometimes write `n = read(fd, buf, len)` so the result lands in a
/// variable; the description should only name the call. Everything up to and
/// including the first `=` is dropped, as is the whitespace after it, unless
/// that `=` starts an `==`.
///
/// Only the first `=` is considered, even when it sits inside the call's
/// parentheses: `f(a = 1)` becomes `1)`.
///
/// ```
/// use faultline_internals::assemble::strip_assignment;
///
/// assert_eq!(strip_assignment("n = read(fd, buf, len)"), "read(fd, buf, len)");
/// assert_eq!(strip_assignment("a == b"), "a == b");
/// ```
pub fn strip_assignment(code: &str) -> &str {
    match code.find('=') {
        Some(pos) if code.as_bytes().get(pos + 1) != Some(&b'=') => code[pos + 1..].trim_start(),
        _ => code,
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;
    use crate::args::split_arguments;

    fn build(head: Head<'_>, text: &str, values: &[&str]) -> String {
        let names = split_arguments(text, values.len());
        assemble(head, &names, values)
    }

    #[test]
    fn test_log_has_no_leading_delimiter() {
        assert_eq!(build(Head::Log, "x, y", &["1", "2"]), "x = 1; y = 2");
        assert_eq!(build(Head::Log, "x", &["1"]), "x = 1");
        assert_eq!(build(Head::Log, "", &[]), "");
    }

    #[test]
    fn test_expected_head() {
        assert_eq!(
            build(Head::Expected { code: "x > 0" }, "x", &["5"]),
            "expected x > 0; x = 5"
        );
        assert_eq!(build(Head::Expected { code: "ok" }, "", &[]), "expected ok");
    }

    #[test]
    fn test_syscall_head() {
        let head = Head::Syscall {
            code: "read(fd, buf, len)",
            error_text: "Bad file descriptor",
        };
        assert_eq!(build(head, "", &[]), "read(fd, buf, len): Bad file descriptor");
        assert_eq!(
            build(head, "fd", &["3"]),
            "read(fd, buf, len): Bad file descriptor; fd = 3"
        );
    }

    #[test]
    fn test_string_literals_render_bare() {
        assert_eq!(
            build(Head::Log, "\"opening file\", path", &["opening file", "/tmp/x"]),
            "opening file; path = /tmp/x"
        );
    }

    #[test]
    fn test_missing_names_render_values_only() {
        assert_eq!(build(Head::Log, "a", &["1", "2", "3"]), "a = 1; 2; 3");
        assert_eq!(
            build(Head::Expected { code: "c" }, "a, b, c", &["1"]),
            "expected c; a = 1"
        );
    }

    #[test]
    fn test_owned_values() {
        let names = split_arguments("a, b", 2);
        let values: Vec<String> = vec!["1".into(), "2".into()];
        assert_eq!(assemble(Head::Log, &names, &values), "a = 1; b = 2");
    }

    #[test]
    fn test_mixed_lengths() {
        let names = split_arguments("alpha, beta", 2);
        let result = assemble(Head::Expected { code: "x" }, &names, &["1", "22"]);
        assert_eq!(result, "expected x; alpha = 1; beta = 22");
    }

    #[test]
    fn test_strip_assignment() {
        assert_eq!(strip_assignment("n = read(fd, buf, len)"), "read(fd, buf, len)");
        assert_eq!(strip_assignment("n=write(fd)"), "write(fd)");
        assert_eq!(strip_assignment("close(fd)"), "close(fd)");
        assert_eq!(strip_assignment("a == b"), "a == b");
        assert_eq!(strip_assignment("x ="), "");
    }

    #[test]
    fn test_strip_assignment_first_equals_wins() {
        assert_eq!(strip_assignment("f(a = 1)"), "1)");
        assert_eq!(strip_assignment("n = f(a = 1)"), "f(a = 1)");
    }
}

//! Recovery of argument names from the source text of a macro invocation.
//!
//! The call-site macros only see the argument list as one flat string (the
//! output of `stringify!`), e.g. `"a, b + 1, f(c, d)"`. This module splits
//! that string on its top-level commas so each pre-rendered value can be
//! shown next to the expression that produced it.
//!
//! The splitter is tolerant: it is not a validator, and unbalanced
//! delimiters only mean the split will look odd.

use alloc::vec::Vec;
use core::ops::Range;

/// A byte range into an argument list denoting one top-level argument.
///
/// The range excludes leading and trailing whitespace. It is only meaningful
/// together with the text it was produced from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArgumentNameSpan {
    start: usize,
    end: usize,
}

impl ArgumentNameSpan {
    /// The byte offset of the first character of the argument.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte offset one past the last character of the argument.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The span as a byte range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns `true` if the span covers no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolves the span against the text it was produced from.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not the text the span was computed from and the
    /// range falls outside it or off a character boundary.
    #[inline]
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range()]
    }
}

/// The argument names recovered from one argument list.
///
/// At most `expected` spans are kept. When the text holds a different number
/// of top-level arguments than expected, [`is_mismatch`](Self::is_mismatch)
/// returns `true` and the missing names read as empty strings.
#[derive(Clone, Debug)]
pub struct ArgumentNames<'a> {
    text: &'a str,
    spans: Vec<ArgumentNameSpan>,
    found: usize,
    expected: usize,
}

impl<'a> ArgumentNames<'a> {
    /// Names for an invocation without arguments.
    pub fn empty() -> Self {
        Self {
            text: "",
            spans: Vec::new(),
            found: 0,
            expected: 0,
        }
    }

    /// The name of argument `index`, or `""` when no name was recovered.
    pub fn name(&self, index: usize) -> &'a str {
        let text = self.text;
        self.spans.get(index).map_or("", |span| span.as_str(text))
    }

    /// The recovered spans, in argument order.
    pub fn spans(&self) -> &[ArgumentNameSpan] {
        &self.spans
    }

    /// The text the spans point into.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The number of top-level arguments found in the text.
    pub fn found(&self) -> usize {
        self.found
    }

    /// The number of arguments the caller supplied values for.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Returns `true` if the text did not split into the expected number of
    /// arguments.
    pub fn is_mismatch(&self) -> bool {
        self.found != self.expected
    }

    fn record(&mut self, start: usize, end: usize) {
        if self.found < self.expected {
            let trimmed = self.text[start..end].trim_end();
            self.spans.push(ArgumentNameSpan {
                start,
                end: start + trimmed.len(),
            });
        }
        self.found += 1;
    }
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

/// Skips a char literal whose opening `'` ends just before `pos`.
///
/// Returns the position after the closing `'`, or `pos` itself when the
/// quote starts a lifetime or label such as `'a` instead.
fn skip_char_literal(text: &str, pos: usize) -> usize {
    let Some(rest) = text.get(pos..) else {
        return pos;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some('\\') => {
            // `'\''`, `'\n'`, `'\u{1F600}'`: the escaped character never
            // closes the literal.
            let Some(escaped) = chars.next() else {
                return pos;
            };
            let after = 1 + escaped.len_utf8();
            match rest[after..].find('\'') {
                Some(close) => pos + after + close + 1,
                None => pos,
            }
        }
        Some(c) if rest[c.len_utf8()..].starts_with('\'') => pos + c.len_utf8() + 1,
        _ => pos,
    }
}

/// Splits `text` into the names of `expected` top-level arguments.
///
/// A comma separates two arguments only outside of string literals, char
/// literals and any `()`, `[]` or `{}` nesting. Inside a string literal a
/// backslash escapes the following character, so `\"` does not end the
/// literal. Char literals such as `'"'` or `','` are skipped whole; a `'`
/// that does not start one (a lifetime or label) is ignored.
///
/// With `expected == 0` the text is not scanned at all.
///
/// # Examples
///
/// ```
/// use faultline_internals::args::split_arguments;
///
/// let names = split_arguments("f(a, b), c", 2);
/// assert_eq!(names.name(0), "f(a, b)");
/// assert_eq!(names.name(1), "c");
/// assert!(!names.is_mismatch());
/// ```
pub fn split_arguments(text: &str, expected: usize) -> ArgumentNames<'_> {
    let mut names = ArgumentNames {
        text,
        spans: Vec::with_capacity(expected),
        found: 0,
        expected,
    };
    if expected == 0 {
        return names;
    }

    let bytes = text.as_bytes();
    let mut start = skip_whitespace(text, 0);
    let mut pos = start;
    let mut depth: isize = 0;
    let mut quoted = false;

    while pos < bytes.len() {
        let c = bytes[pos];
        pos += 1;
        if quoted {
            if c == b'\\' && pos < bytes.len() {
                pos += 1;
            } else if c == b'"' {
                quoted = false;
            }
        } else {
            match c {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth -= 1,
                b'"' => quoted = true,
                b'\'' => pos = skip_char_literal(text, pos),
                b',' if depth == 0 => {
                    names.record(start, pos - 1);
                    start = skip_whitespace(text, pos);
                    pos = start;
                }
                _ => {}
            }
        }
    }
    names.record(start, bytes.len());

    names
}

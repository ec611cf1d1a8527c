//! The exception value carried through the context chain.
//!
//! An [`Exception`] is created once per fault. As it travels outward through
//! the installed [`Context`](crate::Context)s each of them may append a
//! [`ContextAnnotation`]; annotations are never removed.

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::fmt;

/// A location in the source code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin {
    /// The source file path.
    pub file: Cow<'static, str>,
    /// The line number.
    pub line: u32,
}

impl Origin {
    /// Creates an origin from `file!()` and `line!()` style values.
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: Cow::Borrowed(file),
            line,
        }
    }

    /// The location of the caller.
    #[track_caller]
    pub fn caller() -> Self {
        let location = core::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// What kind of failure an exception describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nature {
    /// A condition the program expected to hold did not.
    Regular,
    /// A system call failed.
    OsError,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Nature::Regular => "failed",
            Nature::OsError => "error from OS",
        })
    }
}

/// Whether retrying the failed operation could succeed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Durability {
    /// Retrying will fail the same way.
    Permanent,
    /// The failure may go away on retry.
    Temporary,
}

/// A note added to an exception by a context it passed through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextAnnotation {
    /// Where the context was installed.
    pub origin: Origin,
    /// The rendered context description.
    pub description: String,
}

impl fmt::Display for ContextAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: context: {}", self.origin, self.description)
    }
}

/// A failed assertion or system call, with the context it was raised in.
///
/// The [`Display`](fmt::Display) form lists the annotations outermost first,
/// one per line, followed by the exception itself:
///
/// ```
/// use faultline::{Durability, Exception, Nature, Origin};
///
/// let mut exception = Exception::new(
///     Nature::Regular,
///     Durability::Permanent,
///     Origin::new("src/parse.rs", 12),
///     "expected n > 0; n = 0",
/// );
/// exception.wrap_context(Origin::new("src/load.rs", 40), "path = config.toml");
/// exception.wrap_context(Origin::new("src/main.rs", 7), "starting up");
///
/// assert_eq!(
///     exception.to_string(),
///     "src/main.rs:7: context: starting up\n\
///      src/load.rs:40: context: path = config.toml\n\
///      src/parse.rs:12: failed: expected n > 0; n = 0"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Exception {
    nature: Nature,
    durability: Durability,
    origin: Origin,
    description: String,
    context: Vec<ContextAnnotation>,
}

impl Exception {
    /// Creates an exception without annotations.
    pub fn new(
        nature: Nature,
        durability: Durability,
        origin: Origin,
        description: impl Into<String>,
    ) -> Self {
        Self {
            nature,
            durability,
            origin,
            description: description.into(),
            context: Vec::new(),
        }
    }

    /// The kind of failure.
    pub fn nature(&self) -> Nature {
        self.nature
    }

    /// Whether a retry could succeed.
    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// Where the exception was raised.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The source file the exception was raised in.
    pub fn file(&self) -> &str {
        &self.origin.file
    }

    /// The line the exception was raised on.
    pub fn line(&self) -> u32 {
        self.origin.line
    }

    /// The description produced by the description builder.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The annotations, innermost first.
    pub fn context(&self) -> &[ContextAnnotation] {
        &self.context
    }

    /// Appends an annotation.
    ///
    /// Annotations are added as the exception moves outward, so each call
    /// describes a scope enclosing the previous one.
    pub fn wrap_context(&mut self, origin: Origin, description: impl Into<String>) {
        self.context.push(ContextAnnotation {
            origin,
            description: description.into(),
        });
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in self.context.iter().rev() {
            writeln!(f, "{annotation}")?;
        }
        write!(f, "{}: {}", self.origin, self.nature)?;
        if self.durability == Durability::Temporary {
            write!(f, " (temporary)")?;
        }
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

impl core::error::Error for Exception {}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Exception: Send, Sync, Clone);

    fn exception(nature: Nature, durability: Durability, description: &str) -> Exception {
        Exception::new(nature, durability, Origin::new("lib.rs", 3), description)
    }

    #[test]
    fn test_display_without_context() {
        let e = exception(Nature::Regular, Durability::Permanent, "expected x; x = 1");
        assert_eq!(e.to_string(), "lib.rs:3: failed: expected x; x = 1");

        let e = exception(Nature::OsError, Durability::Temporary, "open(path): busy");
        assert_eq!(e.to_string(), "lib.rs:3: error from OS (temporary): open(path): busy");

        let e = exception(Nature::Regular, Durability::Permanent, "");
        assert_eq!(e.to_string(), "lib.rs:3: failed");
    }

    #[test]
    fn test_annotations_are_appended() {
        let mut e = exception(Nature::Regular, Durability::Permanent, "d");
        e.wrap_context(Origin::new("a.rs", 1), "inner");
        e.wrap_context(Origin::new("b.rs", 2), "outer");

        let descriptions: Vec<&str> = e.context().iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, ["inner", "outer"]);
        assert_eq!(e.context()[1].origin, Origin::new("b.rs", 2));
        assert_eq!(
            e.to_string(),
            "b.rs:2: context: outer\na.rs:1: context: inner\nlib.rs:3: failed: d"
        );
    }

    #[test]
    fn test_accessors() {
        let e = exception(Nature::OsError, Durability::Permanent, "d");
        assert_eq!(e.nature(), Nature::OsError);
        assert_eq!(e.durability(), Durability::Permanent);
        assert_eq!(e.file(), "lib.rs");
        assert_eq!(e.line(), 3);
        assert_eq!(e.origin().to_string(), "lib.rs:3");
        assert_eq!(e.description(), "d");
    }

    #[test]
    fn test_origin_caller() {
        let origin = Origin::caller();
        assert!(origin.file.ends_with("exception.rs"));
        assert_eq!(origin.line, line!() - 2);
    }
}

//! Emitting log lines and adding context to exceptions.
//!
//! These are the functions behind the [`log!`](crate::log!) and
//! [`add_context!`](crate::add_context!) macros. They take the argument list
//! in the form the macros capture it: the source text of all arguments and
//! their rendered values.

use alloc::format;

use crate::{
    context,
    description::{DescriptionStyle, build_description},
    exception::{Exception, Origin},
    severity::Severity,
};

/// Delivers a log line to the current thread's chain.
///
/// The line has the form `<severity>: <file>:<line>: <description>\n`.
/// This does not check [`should_log`](crate::should_log); the macros do
/// that before rendering the values.
pub fn emit<V: AsRef<str>>(origin: &Origin, severity: Severity, arg_list: &str, values: &[V]) {
    let description = build_description(DescriptionStyle::Log, None, 0, arg_list, values);
    context::log_message(severity, &format!("{severity}: {origin}: {description}\n"));
}

/// Appends a context annotation described by the given arguments.
pub fn add_context_to<V: AsRef<str>>(
    exception: &mut Exception,
    origin: Origin,
    arg_list: &str,
    values: &[V],
) {
    let description = build_description(DescriptionStyle::Log, None, 0, arg_list, values);
    exception.wrap_context(origin, description);
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String, vec::Vec};
    use core::cell::RefCell;

    use super::*;
    use crate::{
        context::{Context, ExceptionCallback, Next},
        exception::{Durability, Nature},
    };

    struct Lines(Rc<RefCell<Vec<(Severity, String)>>>);

    impl ExceptionCallback for Lines {
        fn log_message(&self, severity: Severity, text: &str, _next: Next<'_>) {
            self.0.borrow_mut().push((severity, text.into()));
        }
    }

    #[test]
    fn test_emit_formats_line() {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let _context = Context::new(Lines(lines.clone()));

        emit(
            &Origin::new("main.rs", 4),
            Severity::Info,
            "\"starting\", port",
            &["starting", "8080"],
        );

        assert_eq!(
            *lines.borrow(),
            [(
                Severity::Info,
                String::from("info: main.rs:4: starting; port = 8080\n")
            )]
        );
    }

    #[test]
    fn test_add_context_to() {
        let mut exception = Exception::new(
            Nature::Regular,
            Durability::Permanent,
            Origin::new("a.rs", 1),
            "expected ok",
        );
        add_context_to(&mut exception, Origin::new("b.rs", 2), "path, attempt", &["/etc", "3"]);

        assert_eq!(exception.context().len(), 1);
        assert_eq!(exception.context()[0].description, "path = /etc; attempt = 3");
        assert_eq!(exception.context()[0].origin, Origin::new("b.rs", 2));
    }
}

//! Integration tests for the faultline-internals crate.
//!
//! These run the tokenizer and the assembler together on the kind of
//! argument lists `stringify!` produces for the call-site macros.

use faultline_internals::{
    args::{ArgumentNames, split_arguments},
    assemble::{Head, assemble, strip_assignment},
};

static_assertions::assert_impl_all!(ArgumentNames<'static>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Head<'static>: Copy, Send, Sync);

fn describe(head: Head<'_>, text: &str, values: &[&str]) -> String {
    let names = split_arguments(text, values.len());
    assemble(head, &names, values)
}

#[test]
fn test_simple_lists_split_into_trimmed_names() {
    for (text, expected) in [
        ("a", &["a"][..]),
        ("a, b", &["a", "b"][..]),
        ("a,b,c", &["a", "b", "c"][..]),
        ("  first ,   second  ,third  ", &["first", "second", "third"][..]),
        ("x + 1, y * 2", &["x + 1", "y * 2"][..]),
    ] {
        let names = split_arguments(text, expected.len());
        assert!(!names.is_mismatch(), "{text:?}");
        let actual: Vec<&str> = (0..expected.len()).map(|i| names.name(i)).collect();
        assert_eq!(actual, expected, "{text:?}");
    }
}

#[test]
fn test_stringify_output() {
    let text = stringify!(buffer.len(), map.get(&(1, 2)), "done, really", [a, b][0]);
    let names = split_arguments(text, 4);
    assert!(!names.is_mismatch(), "{text:?}");
    assert_eq!(names.name(0), "buffer.len()");
    assert_eq!(names.name(2), "\"done, really\"");
}

#[test]
fn test_log_description() {
    assert_eq!(describe(Head::Log, "x, y", &["1", "2"]), "x = 1; y = 2");
}

#[test]
fn test_assertion_description() {
    assert_eq!(
        describe(Head::Expected { code: "x > 0" }, "x", &["5"]),
        "expected x > 0; x = 5"
    );
}

#[test]
fn test_syscall_description_strips_assignment() {
    let code = strip_assignment("n = read(fd, buf, len)");
    let head = Head::Syscall {
        code,
        error_text: "Bad file descriptor",
    };
    assert_eq!(describe(head, "", &[]), "read(fd, buf, len): Bad file descriptor");
}

#[test]
fn test_message_literals_and_values() {
    assert_eq!(
        describe(
            Head::Expected { code: "size <= limit" },
            "\"request too large\", size, limit",
            &["request too large", "4096", "1024"]
        ),
        "expected size <= limit; request too large; size = 4096; limit = 1024"
    );
}

#[test]
fn test_mismatch_degrades_to_values() {
    let names = split_arguments("a, b", 3);
    assert!(names.is_mismatch());
    assert_eq!(names.found(), 2);
    assert_eq!(names.expected(), 3);
    assert_eq!(assemble(Head::Log, &names, &["1", "2", "3"]), "a = 1; b = 2; 3");

    let names = split_arguments("a, b, c", 1);
    assert!(names.is_mismatch());
    assert_eq!(assemble(Head::Log, &names, &["1"]), "a = 1");
}

#[test]
fn test_empty_names() {
    let names = ArgumentNames::empty();
    assert!(!names.is_mismatch());
    assert_eq!(names.text(), "");
    assert_eq!(assemble::<&str>(Head::Expected { code: "ok" }, &names, &[]), "expected ok");
}

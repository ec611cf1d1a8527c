//! Annotating failures with the scopes they happened in.
//!
//! Each `context!()` lasts until the end of its scope. Every exception
//! reported while it is alive gets one extra line describing that scope,
//! outermost first. A custom `ExceptionCallback` can also intercept log
//! lines, here to indent them by nesting depth.

use faultline::{Context, ExceptionCallback, Next, Severity, check, context, log};

/// Indents log lines passing through it.
struct Indent;

impl ExceptionCallback for Indent {
    fn log_message(&self, severity: Severity, text: &str, next: Next<'_>) {
        next.log_message(severity, &format!("    {text}"));
    }
}

fn apply_migration(table: &str, version: u32) {
    let _context = context!("applying migration", table, version);
    let _indent = Context::new(Indent);

    log!(Warning, "table is large, this may take a while", table);

    let applied_version = version - 1;
    drop(check!(applied_version == version, "schema did not change"));
}

fn main() {
    let database = "inventory";
    let _context = context!("migrating database", database);

    for (table, version) in [("users", 4), ("orders", 7)] {
        apply_migration(table, version);
    }
    // recoverable exception: demos/nested_contexts.rs:31: context: migrating database;
    //   database = inventory
    // demos/nested_contexts.rs:20: context: applying migration; table = users; version = 4
    // demos/nested_contexts.rs:26: failed: expected applied_version == version;
    //   schema did not change
}

//! The logging threshold is process-wide, so it is exercised by a single
//! test in its own binary.

use std::{cell::RefCell, rc::Rc};

use faultline::{
    Context, ExceptionCallback, Next, Severity, debug, log, min_severity, set_min_severity,
    should_log,
};

struct Lines(Rc<RefCell<Vec<String>>>);

impl ExceptionCallback for Lines {
    fn log_message(&self, _severity: Severity, text: &str, _next: Next<'_>) {
        self.0.borrow_mut().push(text.to_string());
    }
}

#[test]
fn test_threshold_controls_emission() {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let _context = Context::new(Lines(lines.clone()));
    let emit_all = || {
        debug!("d");
        log!(Info, "i");
        log!(Warning, "w");
        log!(Error, "e");
        log!(Fatal, "f");
    };
    let emitted = |lines: &Rc<RefCell<Vec<String>>>| -> Vec<String> {
        lines
            .borrow_mut()
            .drain(..)
            .map(|line| line.split(':').next().unwrap_or_default().to_string())
            .collect()
    };

    assert_eq!(min_severity(), Severity::Warning);
    emit_all();
    assert_eq!(emitted(&lines), ["warning", "error", "fatal"]);

    set_min_severity(Severity::Fatal);
    emit_all();
    assert_eq!(emitted(&lines), ["fatal"]);

    set_min_severity(Severity::Info);
    assert!(!should_log(Severity::Debug));
    emit_all();
    assert_eq!(emitted(&lines), ["info", "warning", "error", "fatal"]);

    set_min_severity(Severity::Debug);
    emit_all();
    assert_eq!(
        emitted(&lines),
        ["debug", "info", "warning", "error", "fatal"]
    );

    set_min_severity(Severity::Warning);
}

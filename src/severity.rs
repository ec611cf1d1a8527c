//! Message severities and the process-wide logging threshold.
//!
//! Log call sites check [`should_log`] before rendering their arguments, so a
//! disabled message costs one atomic load.
//!
//! The threshold is meant to be configured once at startup, before threads
//! start logging (see [`init_from_env`](crate::config::init_from_env)).
//! Changing it later is allowed, but other threads may observe the change
//! at any point.

use core::{
    cmp::Ordering,
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU8, Ordering as AtomicOrdering},
};

/// How urgent a message is.
///
/// `Info`, `Warning`, `Error` and `Fatal` are ordered by increasing urgency.
/// `Debug` stands outside that order: it is only shown when debug output is
/// explicitly enabled, and comparing it to any other severity yields `None`.
///
/// ```
/// use faultline::Severity;
///
/// assert!(Severity::Warning < Severity::Error);
/// assert_eq!(Severity::Debug.partial_cmp(&Severity::Info), None);
/// assert_eq!(Severity::Fatal.to_string(), "fatal");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Information about the normal operation of the program.
    Info = 0,
    /// Something unexpected that the program can work around.
    Warning = 1,
    /// Something went wrong; the current operation failed.
    Error = 2,
    /// The program cannot continue.
    Fatal = 3,
    /// Output only useful while debugging.
    Debug = 4,
}

impl Severity {
    /// All severities, in declaration order.
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
        Severity::Debug,
    ];

    /// The canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Debug => "debug",
        }
    }

    const fn rank(self) -> Option<u8> {
        match self {
            Severity::Debug => None,
            other => Some(other as u8),
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Info,
            1 => Severity::Warning,
            2 => Severity::Error,
            3 => Severity::Fatal,
            _ => Severity::Debug,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl ParseSeverityError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParseSeverityError").field(&self.0).finish()
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown severity {:?}, expected one of info, warning, error, fatal, debug",
            self.0
        )
    }
}

impl core::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Warning as u8);

/// The current logging threshold. Defaults to [`Severity::Warning`].
pub fn min_severity() -> Severity {
    Severity::from_u8(MIN_SEVERITY.load(AtomicOrdering::Relaxed))
}

/// Sets the logging threshold.
///
/// Setting it to [`Severity::Debug`] enables every message, including debug
/// output.
pub fn set_min_severity(severity: Severity) {
    MIN_SEVERITY.store(severity as u8, AtomicOrdering::Relaxed);
}

/// Returns `true` if a message of the given severity should be emitted.
///
/// ```
/// use faultline::{Severity, should_log};
///
/// // With the default threshold:
/// assert!(should_log(Severity::Error));
/// assert!(!should_log(Severity::Info));
/// assert!(!should_log(Severity::Debug));
/// ```
pub fn should_log(severity: Severity) -> bool {
    let threshold = min_severity();
    match (severity, threshold) {
        (_, Severity::Debug) => true,
        (Severity::Debug, _) => false,
        (severity, threshold) => severity >= threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names: Vec<String> = Severity::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["info", "warning", "error", "fatal", "debug"]);
    }

    #[test]
    fn test_ordering_excludes_debug() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Error < Severity::Fatal);
        assert!(Severity::Fatal >= Severity::Fatal);
        assert_eq!(Severity::Debug.partial_cmp(&Severity::Debug), Some(Ordering::Equal));
        for severity in [Severity::Info, Severity::Warning, Severity::Error, Severity::Fatal] {
            assert_eq!(Severity::Debug.partial_cmp(&severity), None);
            assert_eq!(severity.partial_cmp(&Severity::Debug), None);
            assert!(!(Severity::Debug >= severity));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse(), Ok(Severity::Warning));
        assert_eq!(" ERROR ".parse(), Ok(Severity::Error));
        assert_eq!("Debug".parse(), Ok(Severity::Debug));

        let error = "loud".parse::<Severity>().unwrap_err();
        assert_eq!(error.input(), "loud");
        assert!(error.to_string().contains("\"loud\""));
    }

    #[test]
    fn test_u8_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_u8(severity as u8), severity);
        }
    }
}

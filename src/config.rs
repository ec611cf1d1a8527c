//! Configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `FAULTLINE_LOG` - The initial logging threshold, one of `info`,
//!   `warning`, `error`, `fatal` or `debug`. `debug` enables every message.
//!
//! The variables are read once per process and cached. Call
//! [`init_from_env`] early in `main`, before other threads start logging.

use std::sync::OnceLock;

use crate::severity::{ParseSeverityError, Severity, set_min_severity};

/// The name of the variable holding the initial logging threshold.
pub const LOG_ENV_VAR: &str = "FAULTLINE_LOG";

#[derive(Debug)]
struct EnvOptions {
    min_severity: Option<Result<Severity, ParseSeverityError>>,
}

impl EnvOptions {
    fn get() -> &'static Self {
        static FAULTLINE_FLAGS: OnceLock<EnvOptions> = OnceLock::new();

        FAULTLINE_FLAGS.get_or_init(|| {
            let min_severity = std::env::var_os(LOG_ENV_VAR)
                .map(|var| var.to_string_lossy().parse::<Severity>());
            EnvOptions { min_severity }
        })
    }
}

/// The threshold requested by `FAULTLINE_LOG`, if the variable is set.
///
/// # Errors
///
/// Returns the parse error if the variable does not name a severity.
pub fn env_min_severity() -> Option<Result<Severity, ParseSeverityError>> {
    EnvOptions::get().min_severity.clone()
}

/// Applies the environment configuration to the process.
///
/// When `FAULTLINE_LOG` is unset the threshold keeps its current value.
///
/// # Errors
///
/// Returns an error, and leaves the threshold untouched, if `FAULTLINE_LOG`
/// holds an unknown severity name.
///
/// # Examples
///
/// ```
/// fn main() {
///     if let Err(error) = faultline::config::init_from_env() {
///         eprintln!("ignoring FAULTLINE_LOG: {error}");
///     }
/// }
/// ```
pub fn init_from_env() -> Result<(), ParseSeverityError> {
    match env_min_severity() {
        Some(Ok(severity)) => {
            set_min_severity(severity);
            Ok(())
        }
        Some(Err(error)) => Err(error),
        None => Ok(()),
    }
}

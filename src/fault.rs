//! Raising faults.
//!
//! A [`Fault`] owns the exception describing a failed assertion or system
//! call until it is disposed of in exactly one of three ways:
//!
//! - **dropped**: the exception is reported through the current context
//!   chain as recoverable, and execution continues;
//! - **[`fatal`](Fault::fatal)**: the exception is reported as fatal, then
//!   the process aborts;
//! - **defused** with [`take_exception`](Fault::take_exception) or
//!   [`into_exception`](Fault::into_exception): the caller takes over the
//!   exception and nothing is reported.

use alloc::format;
use core::{fmt, mem};

use faultline_internals::assemble::strip_assignment;

use crate::{
    context,
    description::{DescriptionStyle, build_description},
    exception::{Durability, Exception, Nature, Origin},
    severity::Severity,
};

/// Error returned when a fault's exception has already been reported or
/// taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaultConsumedError;

impl fmt::Display for FaultConsumedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the fault has already been reported or defused")
    }
}

impl core::error::Error for FaultConsumedError {}

#[derive(Debug)]
enum FaultState {
    Pending(Exception),
    Consumed,
}

/// A raised fault whose exception has not been disposed of yet.
///
/// # Examples
///
/// ```
/// use faultline::{Fault, Nature, Origin};
///
/// let x = -3;
/// let mut fault = Fault::new(
///     Origin::new(file!(), line!()),
///     Nature::Regular,
///     0,
///     Some("x >= 0"),
///     "x",
///     &[x.to_string()],
/// );
/// let exception = fault.take_exception().unwrap();
/// assert_eq!(exception.description(), "expected x >= 0; x = -3");
/// // The fault is defused; dropping it reports nothing.
/// ```
#[must_use = "dropping a fault reports it; call `fatal` to abort instead"]
#[derive(Debug)]
pub struct Fault {
    state: FaultState,
}

impl Fault {
    /// Raises a fault.
    ///
    /// The description follows the syscall style for [`Nature::OsError`],
    /// using `error_number`, and the assertion style otherwise. `condition`
    /// is the source text of the failed condition or call; `arg_list` and
    /// `values` describe the extra arguments as for
    /// [`build_description`].
    ///
    /// Faults raised this way are always [`Durability::Permanent`].
    pub fn new<V: AsRef<str>>(
        origin: Origin,
        nature: Nature,
        error_number: i32,
        condition: Option<&str>,
        arg_list: &str,
        values: &[V],
    ) -> Self {
        let style = match nature {
            Nature::OsError => DescriptionStyle::Syscall,
            Nature::Regular => DescriptionStyle::Assertion,
        };
        let description = build_description(style, condition, error_number, arg_list, values);
        Self::from_exception(Exception::new(
            nature,
            Durability::Permanent,
            origin,
            description,
        ))
    }

    /// Raises a fault for a failed system call.
    ///
    /// `call` is the source text of the call. When `error_number` is `0` the
    /// call failed without the OS reporting an error, so there is no error
    /// text to show; the fault is then raised as a failed
    /// `<call> >= 0` assertion instead of an OS error.
    pub fn syscall<V: AsRef<str>>(
        origin: Origin,
        error_number: i32,
        call: &str,
        arg_list: &str,
        values: &[V],
    ) -> Self {
        if error_number == 0 {
            let condition = format!("{} >= 0", strip_assignment(call));
            Self::new(origin, Nature::Regular, 0, Some(&condition), arg_list, values)
        } else {
            Self::new(origin, Nature::OsError, error_number, Some(call), arg_list, values)
        }
    }

    /// Wraps an existing exception.
    pub fn from_exception(exception: Exception) -> Self {
        Self {
            state: FaultState::Pending(exception),
        }
    }

    /// The pending exception, if it was not disposed of yet.
    pub fn exception(&self) -> Option<&Exception> {
        match &self.state {
            FaultState::Pending(exception) => Some(exception),
            FaultState::Consumed => None,
        }
    }

    /// Returns `true` once the exception was reported or taken.
    pub fn is_consumed(&self) -> bool {
        matches!(self.state, FaultState::Consumed)
    }

    /// Takes the exception out of the fault without reporting it.
    ///
    /// # Errors
    ///
    /// Fails if the exception was already reported or taken.
    pub fn take_exception(&mut self) -> Result<Exception, FaultConsumedError> {
        match mem::replace(&mut self.state, FaultState::Consumed) {
            FaultState::Pending(exception) => Ok(exception),
            FaultState::Consumed => Err(FaultConsumedError),
        }
    }

    /// Consumes the fault, returning its exception without reporting it.
    ///
    /// # Errors
    ///
    /// Fails if the exception was already reported or taken.
    pub fn into_exception(mut self) -> Result<Exception, FaultConsumedError> {
        self.take_exception()
    }

    /// Reports the exception as recoverable now instead of on drop.
    ///
    /// # Errors
    ///
    /// Fails if the exception was already reported or taken.
    pub fn report(&mut self) -> Result<(), FaultConsumedError> {
        let exception = self.take_exception()?;
        context::on_recoverable_exception(exception);
        Ok(())
    }

    /// Reports the exception as fatal and aborts the process.
    ///
    /// This never returns. If the exception was already disposed of, a
    /// [`Severity::Fatal`] line naming the caller is logged instead, since
    /// there is nothing left to report.
    #[track_caller]
    pub fn fatal(mut self) -> ! {
        match self.take_exception() {
            Ok(exception) => context::on_fatal_exception(exception),
            Err(error) => {
                let origin = Origin::caller();
                let severity = Severity::Fatal;
                context::log_message(severity, &format!("{severity}: {origin}: {error}\n"));
            }
        }
        std::process::abort()
    }
}

impl Drop for Fault {
    fn drop(&mut self) {
        if let FaultState::Pending(_) = self.state {
            let _ = self.report();
        }
    }
}

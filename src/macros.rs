//! Call-site macros.
//!
//! All macros take their arguments as a comma-separated list of expressions
//! implementing [`Display`](core::fmt::Display). The source text of the
//! list is captured with `stringify!` and the values are rendered with
//! `to_string`, so every argument shows up in the description as
//! `expression = value`. String literals are shown as they are.

/// Logs a message if its severity passes the threshold.
///
/// The first argument names a [`Severity`](crate::Severity) variant. The
/// arguments are only evaluated when the message is emitted.
///
/// # Examples
///
/// ```
/// use faultline::log;
///
/// let port = 8080;
/// log!(Warning, "listening on a high port", port);
/// // warning: src/main.rs:4: listening on a high port; port = 8080
/// ```
#[macro_export]
macro_rules! log {
    ($severity:ident $(, $arg:expr)* $(,)?) => {
        if $crate::should_log($crate::Severity::$severity) {
            $crate::log::emit(
                &$crate::Origin::new(::core::file!(), ::core::line!()),
                $crate::Severity::$severity,
                ::core::stringify!($($arg),*),
                &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
            );
        }
    };
}

/// Logs a debug message. Shorthand for `log!(Debug, ...)`.
///
/// Debug messages are only emitted when the threshold is
/// [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! debug {
    ($($arg:expr),* $(,)?) => {
        $crate::log!(Debug $(, $arg)*)
    };
}

/// Checks a condition, raising a [`Fault`](crate::Fault) if it does not
/// hold.
///
/// Evaluates to `Result<(), Fault>`. Dropping the fault reports it as
/// recoverable; calling [`fatal`](crate::Fault::fatal) on it aborts.
///
/// # Examples
///
/// ```
/// use faultline::check;
///
/// fn set_len(len: usize, capacity: usize) -> bool {
///     if let Err(_fault) = check!(len <= capacity, "length exceeds capacity", len, capacity) {
///         // The fault is reported when `_fault` goes out of scope:
///         // src/lib.rs:4: failed: expected len <= capacity; length exceeds capacity;
///         //   len = 9; capacity = 4
///         return false;
///     }
///     true
/// }
/// # assert!(set_len(1, 4));
/// ```
#[macro_export]
macro_rules! check {
    ($cond:expr $(, $arg:expr)* $(,)?) => {
        if $cond {
            ::core::result::Result::Ok(())
        } else {
            ::core::result::Result::Err($crate::Fault::new(
                $crate::Origin::new(::core::file!(), ::core::line!()),
                $crate::Nature::Regular,
                0,
                ::core::option::Option::Some(::core::stringify!($cond)),
                ::core::stringify!($($arg),*),
                &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
            ))
        }
    };
}

/// Checks a condition, reporting a fatal fault and aborting if it does not
/// hold.
#[macro_export]
macro_rules! require {
    ($cond:expr $(, $arg:expr)* $(,)?) => {
        if let ::core::result::Result::Err(fault) = $crate::check!($cond $(, $arg)*) {
            fault.fatal()
        }
    };
}

/// Reports a fatal fault unconditionally and aborts.
///
/// The description only contains the arguments, like a log message.
#[macro_export]
macro_rules! fail {
    ($($arg:expr),* $(,)?) => {
        $crate::Fault::new(
            $crate::Origin::new(::core::file!(), ::core::line!()),
            $crate::Nature::Regular,
            0,
            ::core::option::Option::None,
            ::core::stringify!($($arg),*),
            &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
        )
        .fatal()
    };
}

/// Runs a system call, retrying it while it is interrupted.
///
/// `$call` must evaluate to a signed integer that is negative on failure,
/// with the error number left in the OS error slot (`errno`). Evaluates to
/// `Result<T, Fault>` holding the call's result or a fault in the syscall
/// style: `<call>: <OS error text>; <arguments>`.
///
/// A call that fails without setting an error number raises a regular
/// fault, `expected <call> >= 0`, rather than one describing a success code
/// as an error. See [`Fault::syscall`](crate::Fault::syscall).
///
/// # Examples
///
/// ```
/// use faultline::syscall;
///
/// # fn close(_fd: i32) -> i32 { 0 }
/// let fd = 3;
/// match syscall!(close(fd), fd) {
///     Ok(_) => {}
///     Err(fault) => fault.fatal(),
/// }
/// ```
#[macro_export]
macro_rules! syscall {
    ($call:expr $(, $arg:expr)* $(,)?) => {
        match $crate::description::retry_interrupted(|| $call, $crate::os_error_number) {
            ::core::result::Result::Ok(result) => ::core::result::Result::Ok(result),
            ::core::result::Result::Err(error_number) => {
                ::core::result::Result::Err($crate::Fault::syscall(
                    $crate::Origin::new(::core::file!(), ::core::line!()),
                    error_number,
                    ::core::stringify!($call),
                    ::core::stringify!($($arg),*),
                    &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
                ))
            }
        }
    };
}

/// Installs a [`Context`](crate::Context) annotating exceptions raised while
/// it is alive.
///
/// The arguments are rendered immediately. Bind the result to a named
/// variable; `let _ = context!(...)` would drop it right away.
///
/// # Examples
///
/// ```
/// use faultline::context;
///
/// fn load(path: &str) {
///     let _context = context!("loading configuration", path);
///     // Exceptions raised here carry:
///     // src/config.rs:4: context: loading configuration; path = app.toml
/// }
/// # load("app.toml");
/// ```
#[macro_export]
macro_rules! context {
    ($($arg:expr),* $(,)?) => {
        $crate::Context::annotate(
            $crate::Origin::new(::core::file!(), ::core::line!()),
            $crate::build_description(
                $crate::DescriptionStyle::Log,
                ::core::option::Option::None,
                0,
                ::core::stringify!($($arg),*),
                &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
            ),
        )
    };
}

/// Appends a context annotation to an [`Exception`](crate::Exception).
#[macro_export]
macro_rules! add_context {
    ($exception:expr $(, $arg:expr)* $(,)?) => {
        $crate::log::add_context_to(
            &mut $exception,
            $crate::Origin::new(::core::file!(), ::core::line!()),
            ::core::stringify!($($arg),*),
            &$crate::__private::values([$($crate::__private::render(&$arg)),*]),
        )
    };
}

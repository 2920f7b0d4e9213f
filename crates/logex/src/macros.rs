//! crates/logex/src/macros.rs
//! Formatting macros for the process logger.
//!
//! Each macro forwards `format_args!` to the matching `*f` free function, so
//! the recorded caller is the macro call site.

/// Logs a formatted message at debug severity.
///
/// # Example
/// ```ignore
/// logex::debugf!("loaded {} plugins", count);
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at info severity.
///
/// # Example
/// ```ignore
/// logex::infof!("listening on {}", addr);
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at warning severity.
///
/// # Example
/// ```ignore
/// logex::warnf!("disk {}% full", pct);
/// ```
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::warnf(::std::format_args!($($arg)+))
    };
}

/// Alias of [`warnf!`].
#[macro_export]
macro_rules! warningf {
    ($($arg:tt)+) => {
        $crate::warningf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at error severity.
///
/// # Example
/// ```ignore
/// logex::errorf!("code={}", 42);
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at fatal severity and exits the process.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message at panic severity and panics with it.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::panicf(::std::format_args!($($arg)+))
    };
}

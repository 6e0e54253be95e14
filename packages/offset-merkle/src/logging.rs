//! Diagnostics for tree construction and proof handling.
//!
//! With the `logging` feature the `log` crate macros are used as-is and any
//! logger installed by the host application receives the records. Without it
//! the macros below accept the same syntax and compile to nothing, while still
//! type-checking their arguments so that values used only for diagnostics do
//! not trigger unused warnings.

#[cfg(feature = "logging")]
mod enabled {
    pub(crate) use log::{debug, trace};
}

#[cfg(not(feature = "logging"))]
mod disabled {
    macro_rules! debug {
        ($($arg:tt)+) => {
            if false {
                let _ = format_args!($($arg)+);
            }
        };
    }

    macro_rules! trace {
        ($($arg:tt)+) => {
            if false {
                let _ = format_args!($($arg)+);
            }
        };
    }

    pub(crate) use {debug, trace};
}

#[cfg(feature = "logging")]
pub(crate) use enabled::*;

#[cfg(not(feature = "logging"))]
pub(crate) use disabled::*;

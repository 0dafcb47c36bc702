use std::panic::Location;

use strum::EnumIs;
use thiserror::Error;

/// Message carried by every [`ValuePreservingCastError`].
pub const NOT_VALUE_PRESERVING: &str = "conversion is not value preserving";

/// Raised when an untyped constant is consumed as a concrete type that cannot hold its
/// exact value.
///
/// The error only records where the conversion was attempted. It does not carry the
/// offending value nor the target type: the call site is enough to find the expression,
/// and the error stays trivially cheap to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("conversion is not value preserving")]
pub struct ValuePreservingCastError {
    location: &'static Location<'static>,
}

impl ValuePreservingCastError {
    /// Creates an error located at the caller (through any chain of `#[track_caller]`
    /// functions).
    #[track_caller]
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            location: Location::caller(),
        }
    }

    /// Fixed human-readable description, identical for every failure.
    #[inline]
    pub const fn message(&self) -> &'static str {
        NOT_VALUE_PRESERVING
    }

    /// Source location of the failed conversion.
    #[inline]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// Failure to read a textual literal into an untyped constant.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum ParseConstantError {
    /// No digits were found where some were expected.
    #[error("literal `{0}` contains no digits")]
    Empty(String),

    /// A character is not a valid digit for the literal's radix.
    #[error("literal `{literal}` contains invalid digit `{digit}`")]
    InvalidDigit { literal: String, digit: char },

    /// The magnitude does not fit the 64 bits available to an integer constant.
    #[error("literal `{0}` does not fit in 64 bits")]
    Overflow(String),

    /// The decimal exponent is beyond what an extended real can hold.
    #[error("literal `{literal}` has exponent {exponent} outside of [-{max}, {max}]")]
    ExponentOutOfRange {
        literal: String,
        exponent: i64,
        max: i64,
    },
}

//! Untyped integer constants.
use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Neg,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    check::{self, Binary, Checked, Inexact, Limits},
    error::ValuePreservingCastError,
    target::Arithmetic,
};

/// An integer that is not bound to any width yet.
///
/// The value is stored as a sign and a 64-bit magnitude, so every `i64` and every `u64`
/// can be lifted. It is only turned into a concrete type through a checked conversion
/// (explicitly with [`IntegerConstant::convert_to`], or implicitly when combined with a
/// primitive through an operator), and that conversion fails rather than wrap.
///
/// Negative zero is representable (`-lift_unsigned(0)`) and converts to zero everywhere.
/// Bitwise complement and logical negation are deliberately not provided: the former
/// depends on a width the constant does not have, the latter should be written as an
/// explicit `0` or `1`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegerConstant {
    magnitude: u64,
    negative: bool,
}

impl IntegerConstant {
    /// The constant `0`.
    pub const ZERO: Self = Self::lift_unsigned(0);

    /// Lifts an unsigned value. Always succeeds.
    #[inline]
    pub const fn lift_unsigned(value: u64) -> Self {
        Self {
            magnitude: value,
            negative: false,
        }
    }

    /// Lifts a signed value. Always succeeds, `i64::MIN` included.
    #[inline]
    pub const fn lift_signed(value: i64) -> Self {
        Self {
            magnitude: value.unsigned_abs(),
            negative: value < 0,
        }
    }

    /// Builds a constant from its sign and magnitude.
    #[inline]
    pub const fn from_parts(negative: bool, magnitude: u64) -> Self {
        Self {
            magnitude,
            negative,
        }
    }

    /// Absolute value of the constant.
    #[inline]
    pub const fn magnitude(&self) -> u64 {
        self.magnitude
    }

    /// Sign flag. Note that negative zero reports `true`.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.magnitude == 0
    }

    /// Flips the sign, keeping the magnitude.
    #[inline]
    pub const fn negate(self) -> Self {
        Self {
            magnitude: self.magnitude,
            negative: !self.negative,
        }
    }

    /// Unary plus.
    #[inline]
    pub const fn pos(self) -> Self {
        self
    }

    /// Binary form used by the conversion check. The sign of zero is dropped: integers
    /// have no negative zero, so neither should the floats they convert to.
    #[inline]
    pub(crate) const fn binary(self) -> Binary {
        Binary::integral(self.negative && self.magnitude != 0, self.magnitude)
    }

    #[inline]
    pub(crate) const fn check(self, limits: Limits) -> Result<Checked, Inexact> {
        check::check(self.binary(), limits)
    }

    /// Returns `true` when [`IntegerConstant::convert_to`] would succeed for `T`.
    #[inline]
    pub fn fits_in<T: Arithmetic>(self) -> bool {
        self.check(T::LIMITS).is_ok()
    }

    /// Converts the constant to `T` if, and only if, `T` holds the exact same value.
    ///
    /// For integral targets the magnitude is compared against the range of `T`, the
    /// most negative value included. For floating targets every significant bit of the
    /// magnitude must fit the significand of `T` (`0x100_0001` does not fit `f32`).
    ///
    /// The returned error points at the caller.
    #[track_caller]
    #[inline]
    pub fn convert_to<T: Arithmetic>(self) -> Result<T, ValuePreservingCastError> {
        check::convert(self, self.check(T::LIMITS), T::from_checked)
    }

    /// Same as [`IntegerConstant::convert_to`], but panics at the caller on failure.
    ///
    /// This is what the operator overlay uses.
    #[track_caller]
    #[inline]
    pub fn cast<T: Arithmetic>(self) -> T {
        match self.convert_to() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl Default for IntegerConstant {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Neg for IntegerConstant {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// Equality on values: `-0 == 0`.
impl PartialEq for IntegerConstant {
    fn eq(&self, other: &Self) -> bool {
        self.binary() == other.binary()
    }
}

impl Eq for IntegerConstant {}

impl Hash for IntegerConstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Binary {
            negative,
            significand,
            ..
        } = self.binary();
        negative.hash(state);
        significand.hash(state);
    }
}

impl fmt::Display for IntegerConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

macro_rules! integer_constant_from {
    (unsigned $($ty:ty),+) => {
        $(
            impl From<$ty> for IntegerConstant {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::lift_unsigned(value as u64)
                }
            }
        )+
    };
    (signed $($ty:ty),+) => {
        $(
            impl From<$ty> for IntegerConstant {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::lift_signed(value as i64)
                }
            }
        )+
    };
}

integer_constant_from!(unsigned u8, u16, u32, u64, usize);
integer_constant_from!(signed i8, i16, i32, i64, isize);

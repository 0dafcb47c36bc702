//! Untyped real constants.
use std::{fmt, ops::Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    check::{self, Binary, Checked, Inexact, Limits},
    consts::int::IntegerConstant,
    error::ValuePreservingCastError,
    target::Arithmetic,
};

/// Extended binary value backing a [`RealConstant`].
///
/// Finite values keep a 64-bit significand (the precision of the x87 80-bit format) and
/// a 32-bit binary exponent, normalized so that the significand is odd or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
enum RealDef {
    Finite {
        negative: bool,
        significand: u64,
        exponent: i32,
    },
    Infinity {
        negative: bool,
    },
    NaN,
}

/// A real number that is not bound to any floating-point (or integer) type yet.
///
/// Conversion to a concrete type succeeds only when the target represents the exact
/// same value: `0.5` converts to `f32`, `0.1` does not, and `2.0` converts to `i32`.
/// Infinities and NaN can be lifted but never convert.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RealConstant {
    def: RealDef,
}

impl RealConstant {
    /// The constant `0.0`.
    pub const ZERO: Self = Self::from_parts(false, 0, 0);

    /// Positive infinity.
    pub const INFINITY: Self = Self {
        def: RealDef::Infinity { negative: false },
    };

    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self {
        def: RealDef::Infinity { negative: true },
    };

    /// Not a number.
    pub const NAN: Self = Self { def: RealDef::NaN };

    /// Builds the finite value `(-1)^negative * significand * 2^exponent`.
    #[inline]
    pub const fn from_parts(negative: bool, significand: u64, exponent: i32) -> Self {
        let Binary {
            negative,
            significand,
            exponent,
        } = Binary {
            negative,
            significand,
            exponent,
        }
        .normalized();
        Self {
            def: RealDef::Finite {
                negative,
                significand,
                exponent,
            },
        }
    }

    /// Lifts a native `f64`, exactly. Always succeeds.
    pub const fn lift(value: f64) -> Self {
        let bits = value.to_bits();
        let negative = bits >> 63 != 0;
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1 << 52) - 1);

        match biased {
            0x7ff if fraction == 0 => Self {
                def: RealDef::Infinity { negative },
            },
            0x7ff => Self::NAN,
            0 => Self::from_parts(negative, fraction, -1074),
            _ => Self::from_parts(negative, fraction | (1 << 52), biased - 1075),
        }
    }

    /// Lifts a native `f32`, exactly. Always succeeds.
    #[inline]
    pub const fn lift_f32(value: f32) -> Self {
        Self::lift(value as f64)
    }

    /// Sign, odd (or zero) significand and exponent of a finite value.
    #[inline]
    pub const fn parts(&self) -> Option<(bool, u64, i32)> {
        match self.def {
            RealDef::Finite {
                negative,
                significand,
                exponent,
            } => Some((negative, significand, exponent)),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_finite(&self) -> bool {
        matches!(self.def, RealDef::Finite { .. })
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.def, RealDef::Infinity { .. })
    }

    #[inline]
    pub const fn is_nan(&self) -> bool {
        matches!(self.def, RealDef::NaN)
    }

    /// Sign bit, `-0.0` included. NaN reports `false`.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        match self.def {
            RealDef::Finite { negative, .. } | RealDef::Infinity { negative } => negative,
            RealDef::NaN => false,
        }
    }

    /// Flips the sign.
    pub const fn negate(self) -> Self {
        let def = match self.def {
            RealDef::Finite {
                negative,
                significand,
                exponent,
            } => RealDef::Finite {
                negative: !negative,
                significand,
                exponent,
            },
            RealDef::Infinity { negative } => RealDef::Infinity {
                negative: !negative,
            },
            RealDef::NaN => RealDef::NaN,
        };
        Self { def }
    }

    /// Unary plus.
    #[inline]
    pub const fn pos(self) -> Self {
        self
    }

    pub(crate) const fn check(self, limits: Limits) -> Result<Checked, Inexact> {
        match self.def {
            RealDef::Finite {
                negative,
                significand,
                exponent,
            } => check::check(
                Binary {
                    negative,
                    significand,
                    exponent,
                },
                limits,
            ),
            RealDef::Infinity { .. } | RealDef::NaN => Err(Inexact::Range),
        }
    }

    /// Returns `true` when [`RealConstant::convert_to`] would succeed for `T`.
    #[inline]
    pub fn fits_in<T: Arithmetic>(self) -> bool {
        self.check(T::LIMITS).is_ok()
    }

    /// Converts the constant to `T` if, and only if, `T` holds the exact same value.
    ///
    /// Fails when the value is outside of the range of `T`, when `T` lacks the
    /// significand bits to hold it, or when `T` is integral and the value has a
    /// fractional part. The returned error points at the caller.
    #[track_caller]
    #[inline]
    pub fn convert_to<T: Arithmetic>(self) -> Result<T, ValuePreservingCastError> {
        check::convert(self, self.check(T::LIMITS), T::from_checked)
    }

    /// Same as [`RealConstant::convert_to`], but panics at the caller on failure.
    #[track_caller]
    #[inline]
    pub fn cast<T: Arithmetic>(self) -> T {
        match self.convert_to() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl Default for RealConstant {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Finite values are normalized on the way in, like [`RealConstant::from_parts`].
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RealConstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "RealConstant")]
        struct Repr {
            def: RealDef,
        }

        let Repr { def } = Repr::deserialize(deserializer)?;
        Ok(match def {
            RealDef::Finite {
                negative,
                significand,
                exponent,
            } => Self::from_parts(negative, significand, exponent),
            def => Self { def },
        })
    }
}

impl Neg for RealConstant {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// IEEE-like equality: NaN differs from everything, `-0.0 == 0.0`.
impl PartialEq for RealConstant {
    fn eq(&self, other: &Self) -> bool {
        match (self.def, other.def) {
            (
                RealDef::Finite { significand: 0, .. },
                RealDef::Finite { significand: 0, .. },
            ) => true,
            (RealDef::NaN, _) | (_, RealDef::NaN) => false,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for RealConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            RealDef::NaN => write!(f, "NaN"),
            RealDef::Infinity { negative } => write!(f, "{}inf", if negative { "-" } else { "" }),
            RealDef::Finite {
                negative,
                significand,
                exponent,
            } => match self.check(f64::LIMITS) {
                Ok(Checked::Floating(value)) => write!(f, "{value:?}"),
                _ => write!(
                    f,
                    "{}{}p{}",
                    if negative { "-" } else { "" },
                    significand,
                    exponent
                ),
            },
        }
    }
}

impl From<f64> for RealConstant {
    #[inline]
    fn from(value: f64) -> Self {
        Self::lift(value)
    }
}

impl From<f32> for RealConstant {
    #[inline]
    fn from(value: f32) -> Self {
        Self::lift_f32(value)
    }
}

/// Lossless promotion: a 64-bit magnitude always fits the 64-bit significand.
impl From<IntegerConstant> for RealConstant {
    #[inline]
    fn from(value: IntegerConstant) -> Self {
        Self::from_parts(
            value.is_negative() && !value.is_zero(),
            value.magnitude(),
            0,
        )
    }
}

/// Integral real values whose magnitude fits 64 bits.
impl TryFrom<RealConstant> for IntegerConstant {
    type Error = ValuePreservingCastError;

    #[track_caller]
    fn try_from(value: RealConstant) -> Result<Self, Self::Error> {
        const LIMITS: Limits = Limits::Integral {
            lowest_magnitude: u64::MAX as u128,
            max: u64::MAX as u128,
        };
        check::convert(value, value.check(LIMITS), |checked| match checked {
            Checked::Integral {
                negative,
                magnitude,
            } => IntegerConstant::from_parts(negative, magnitude as u64),
            Checked::Floating(_) => unreachable!("integral limits accept integral values only"),
        })
    }
}

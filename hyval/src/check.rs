//! Conversion check
//!
//! Decides whether an untyped constant can be turned into a concrete arithmetic type
//! without changing its value. Both constant kinds are first brought to a common binary
//! form, `(-1)^negative * significand * 2^exponent`, which is then compared against the
//! [`Limits`] of the target:
//!
//! - integral targets need an integral value whose magnitude fits `[lowest, max]`;
//! - floating targets need the significant bits to fit the significand, and the lowest
//!   and highest set bits to fall inside the exponent range (subnormals included).
//!
//! Everything up to the final cast is `const`, so the same check runs during constant
//! evaluation and at runtime.
use std::{any::type_name, fmt};

use log::debug;
use strum::{Display, EnumIs};

use crate::error::ValuePreservingCastError;

/// Representable set of a concrete arithmetic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Limits {
    /// Two's complement or unsigned integer covering `[-lowest_magnitude, max]`.
    Integral { lowest_magnitude: u128, max: u128 },

    /// IEEE-754 binary format, using the conventions of `f64::MANTISSA_DIGITS`,
    /// `f64::MIN_EXP` and `f64::MAX_EXP`.
    ///
    /// `digits` may not exceed 53: checked values are materialised as `f64`.
    Floating { digits: u32, min_exp: i32, max_exp: i32 },
}

/// A value proven to be exactly representable in the target of the check.
///
/// Only the final cast is left to do, and that cast cannot round nor wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Checked {
    /// Integral value, with `magnitude <= lowest_magnitude` when negative and
    /// `magnitude <= max` otherwise.
    Integral { negative: bool, magnitude: u128 },

    /// Floating value, exactly representable in the target format.
    Floating(f64),
}

/// Why a check failed. Collapsed into [`ValuePreservingCastError`] at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIs)]
pub(crate) enum Inexact {
    /// Magnitude or exponent beyond what the target can hold at all.
    #[strum(to_string = "out of range")]
    Range,

    /// Magnitude in range, but the target lacks the bits to hold it exactly.
    #[strum(to_string = "precision loss")]
    Precision,
}

/// Finite value `(-1)^negative * significand * 2^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Binary {
    pub negative: bool,
    pub significand: u64,
    pub exponent: i32,
}

impl Binary {
    /// Integral value with the given sign and magnitude.
    #[inline]
    pub const fn integral(negative: bool, magnitude: u64) -> Self {
        Self {
            negative,
            significand: magnitude,
            exponent: 0,
        }
    }

    /// Canonical form: odd significand, or a zero significand with a zero exponent.
    ///
    /// Two finite binaries denote the same value (up to the sign of zero) iff their
    /// normalized forms agree on `significand` and `exponent`.
    pub const fn normalized(self) -> Self {
        if self.significand == 0 {
            return Self {
                negative: self.negative,
                significand: 0,
                exponent: 0,
            };
        }
        let shift = self.significand.trailing_zeros();
        Self {
            negative: self.negative,
            significand: self.significand >> shift,
            exponent: self.exponent.saturating_add(shift as i32),
        }
    }
}

/// Runs the check of `value` against `limits`.
pub(crate) const fn check(value: Binary, limits: Limits) -> Result<Checked, Inexact> {
    match limits {
        Limits::Integral {
            lowest_magnitude,
            max,
        } => match integral(value, lowest_magnitude, max) {
            Ok(magnitude) => Ok(Checked::Integral {
                negative: value.negative,
                magnitude,
            }),
            Err(reason) => Err(reason),
        },
        Limits::Floating {
            digits,
            min_exp,
            max_exp,
        } => match floating(value, digits, min_exp, max_exp) {
            Ok(value) => Ok(Checked::Floating(value)),
            Err(reason) => Err(reason),
        },
    }
}

const fn integral(value: Binary, lowest_magnitude: u128, max: u128) -> Result<u128, Inexact> {
    let Binary {
        negative,
        significand,
        exponent,
    } = value;

    let mut magnitude = significand as u128;
    if significand != 0 {
        if exponent < 0 {
            // Every dropped bit must be zero, otherwise the value has a fractional part.
            let shift = exponent.unsigned_abs();
            if significand.trailing_zeros() < shift {
                return Err(Inexact::Precision);
            }
            magnitude = (significand >> shift) as u128;
        } else if exponent > 0 {
            let shift = exponent as u32;
            if magnitude.leading_zeros() < shift {
                return Err(Inexact::Range);
            }
            magnitude <<= shift;
        }
    }

    let limit = if negative { lowest_magnitude } else { max };
    if magnitude > limit {
        Err(Inexact::Range)
    } else {
        Ok(magnitude)
    }
}

const fn floating(value: Binary, digits: u32, min_exp: i32, max_exp: i32) -> Result<f64, Inexact> {
    let Binary {
        negative,
        significand,
        exponent,
    } = value.normalized();
    if significand == 0 {
        return Ok(if negative { -0.0 } else { 0.0 });
    }

    // value lies in [2^(high - 1), 2^high), its lowest set bit has weight 2^exponent
    let width = u64::BITS - significand.leading_zeros();
    let low = exponent as i64;
    let high = low + width as i64;
    let min_low = min_exp as i64 - digits as i64;

    if high > max_exp as i64 || high <= min_low {
        return Err(Inexact::Range);
    }
    if width > digits || low < min_low {
        return Err(Inexact::Precision);
    }

    let magnitude = scale(significand, low as i32);
    Ok(if negative { -magnitude } else { magnitude })
}

/// `2^exp` for a normal exponent, `exp` in `[-1022, 1023]`.
const fn pow2(exp: i32) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// `significand * 2^exp`, for a product known to be exactly representable as `f64`.
const fn scale(significand: u64, exp: i32) -> f64 {
    let value = significand as f64;
    if exp >= -1022 {
        value * pow2(exp)
    } else {
        // Subnormal result: the first product stays normal, the second one is exact.
        value * pow2(-1022) * pow2(exp + 1022)
    }
}

/// Turns the outcome of a check into the target value, or into an error located at the
/// caller.
///
/// `finish` performs the final cast, usually [`crate::Arithmetic::from_checked`].
#[track_caller]
pub(crate) fn convert<T>(
    source: impl fmt::Display,
    outcome: Result<Checked, Inexact>,
    finish: impl FnOnce(Checked) -> T,
) -> Result<T, ValuePreservingCastError> {
    match outcome {
        Ok(checked) => Ok(finish(checked)),
        Err(reason) => {
            let error = ValuePreservingCastError::new();
            debug!(
                "untyped constant {} cannot be converted to `{}` ({}) at {}",
                source,
                type_name::<T>(),
                reason,
                error.location()
            );
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F32: Limits = Limits::Floating {
        digits: f32::MANTISSA_DIGITS,
        min_exp: f32::MIN_EXP,
        max_exp: f32::MAX_EXP,
    };

    const F64: Limits = Limits::Floating {
        digits: f64::MANTISSA_DIGITS,
        min_exp: f64::MIN_EXP,
        max_exp: f64::MAX_EXP,
    };

    const I16: Limits = Limits::Integral {
        lowest_magnitude: 0x8000,
        max: 0x7fff,
    };

    fn finite(negative: bool, significand: u64, exponent: i32) -> Binary {
        Binary {
            negative,
            significand,
            exponent,
        }
    }

    #[test]
    fn integral_boundaries() {
        assert_eq!(
            check(Binary::integral(true, 0x8000), I16),
            Ok(Checked::Integral {
                negative: true,
                magnitude: 0x8000
            })
        );
        assert_eq!(check(Binary::integral(false, 0x8000), I16), Err(Inexact::Range));
        assert_eq!(check(Binary::integral(true, 0x8001), I16), Err(Inexact::Range));
        assert!(check(Binary::integral(false, 0x7fff), I16).is_ok());
    }

    #[test]
    fn integral_from_scaled_values() {
        // 3 * 2^-1 is not integral
        assert_eq!(check(finite(false, 3, -1), I16), Err(Inexact::Precision));
        // 12 * 2^-2 == 3
        assert_eq!(
            check(finite(false, 12, -2), I16),
            Ok(Checked::Integral {
                negative: false,
                magnitude: 3
            })
        );
        // 1 * 2^15 overflows i16, 1 * 2^200 overflows everything
        assert_eq!(check(finite(false, 1, 15), I16), Err(Inexact::Range));
        assert!(check(finite(true, 1, 15), I16).is_ok());
        assert_eq!(check(finite(false, 1, 200), I16), Err(Inexact::Range));
        // fractional bits far below the significand
        assert_eq!(check(finite(false, 1, -100), I16), Err(Inexact::Precision));
    }

    #[test]
    fn floating_significand_width() {
        assert_eq!(
            check(Binary::integral(false, 0x100_0000), F32),
            Ok(Checked::Floating(16777216.0))
        );
        assert_eq!(
            check(Binary::integral(false, 0x100_0001), F32),
            Err(Inexact::Precision)
        );
        assert_eq!(
            check(Binary::integral(false, 0x100_0001), F64),
            Ok(Checked::Floating(16777217.0))
        );
        assert_eq!(
            check(Binary::integral(true, 0xf000_0000_0000_0000), F32),
            Ok(Checked::Floating(-17293822569102704640.0))
        );
    }

    #[test]
    fn floating_exponent_range() {
        // f32::MAX == (2^24 - 1) * 2^104
        assert!(check(finite(false, (1 << 24) - 1, 104), F32).is_ok());
        assert_eq!(check(finite(false, 1, 128), F32), Err(Inexact::Range));
        // smallest subnormals
        assert_eq!(
            check(finite(false, 1, -149), F32),
            Ok(Checked::Floating(f32::from_bits(1) as f64))
        );
        assert_eq!(
            check(finite(false, 1, -1074), F64),
            Ok(Checked::Floating(f64::from_bits(1)))
        );
        assert_eq!(check(finite(false, 1, -150), F32), Err(Inexact::Range));
        // a subnormal needing one bit below the smallest subnormal
        assert_eq!(check(finite(false, 3, -150), F32), Err(Inexact::Precision));
    }

    #[test]
    fn floating_keeps_sign_of_zero() {
        let Ok(Checked::Floating(zero)) = check(finite(true, 0, 12), F64) else {
            panic!("zero must always convert");
        };
        assert!(zero == 0.0 && zero.is_sign_negative());
    }

    #[test]
    fn normalization_strips_trailing_zeros() {
        assert_eq!(finite(false, 8, 1).normalized(), finite(false, 1, 4));
        assert_eq!(finite(true, 0, -7).normalized(), finite(true, 0, 0));
    }

    #[test]
    fn reasons_are_distinguished_internally() {
        assert!(check(finite(false, 1, -1), I16).unwrap_err().is_precision());
        assert!(check(finite(false, 1, 16), I16).unwrap_err().is_range());
        assert_eq!(Inexact::Range.to_string(), "out of range");
    }

    mod capture {
        use std::sync::{Mutex, Once};

        use log::{LevelFilter, Log, Metadata, Record};

        static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());

        struct Capture;

        impl Log for Capture {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                RECORDS.lock().unwrap().push(record.args().to_string());
            }

            fn flush(&self) {}
        }

        static LOGGER: Capture = Capture;

        pub fn install() {
            static INIT: Once = Once::new();
            INIT.call_once(|| {
                log::set_logger(&LOGGER).expect("no other logger in unit tests");
                log::set_max_level(LevelFilter::Debug);
            });
        }

        /// Records mentioning `needle`; other tests may log concurrently.
        pub fn records_with(needle: &str) -> Vec<String> {
            RECORDS
                .lock()
                .unwrap()
                .iter()
                .filter(|record| record.contains(needle))
                .cloned()
                .collect()
        }
    }

    #[test]
    fn failed_conversions_log_their_reason() {
        capture::install();

        let outcome = check(Binary::integral(false, 0x8000), I16);
        assert!(convert("<wide 0x8000>", outcome, |_| 0i16).is_err());
        let records = capture::records_with("<wide 0x8000>");
        assert_eq!(records.len(), 1);
        assert!(records[0].contains("`i16`"));
        assert!(records[0].contains("(out of range)"));
        assert!(records[0].contains(file!()));

        let outcome = check(finite(false, 3, -1), I16);
        assert!(convert("<half 3>", outcome, |_| 0i16).is_err());
        let records = capture::records_with("<half 3>");
        assert_eq!(records.len(), 1);
        assert!(records[0].contains("(precision loss)"));

        let outcome = check(Binary::integral(false, 7), I16);
        assert_eq!(convert("<exact 7>", outcome, |_| 7i16), Ok(7));
        assert!(capture::records_with("<exact 7>").is_empty());
    }
}

//! Literal front door.
//!
//! Reads the textual form of a numeric literal into an untyped constant:
//!
//! - integers: optional sign, optional `0x`/`0o`/`0b` radix prefix, digits with `_`
//!   separators (`-0x8000`, `0b11`, `1_000`);
//! - reals: optional sign, decimal digits with an optional fraction and an optional
//!   exponent (`.5`, `2.`, `.2e1`, `1e-3`), or `inf`/`infinity`/`nan`.
//!
//! Real literals are rounded once, to nearest with ties to even, to the 64-bit
//! significand of [`RealConstant`].
use std::str::FromStr;

use num_bigint::BigUint;

use crate::{
    consts::{AnyConstant, int::IntegerConstant, real::RealConstant},
    error::ParseConstantError,
};

/// Largest accepted decimal exponent, in absolute value, once the literal is written
/// with a single leading digit (`d.ddd e±N`). Matches the range of the x87
/// extended format (about `1e±4932`) with some headroom.
pub const MAX_DECIMAL_EXPONENT: i64 = 10_000;

fn split_sign(body: &str) -> (bool, &str) {
    match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body.strip_prefix('+').unwrap_or(body)),
    }
}

fn split_radix(body: &str) -> Option<(u32, &str)> {
    let radix = match body.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &body[2..]))
}

fn parse_magnitude(literal: &str, digits: &str, radix: u32) -> Result<u64, ParseConstantError> {
    let mut magnitude = 0u64;
    let mut seen = false;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| ParseConstantError::InvalidDigit {
                literal: literal.to_string(),
                digit: c,
            })?;
        magnitude = magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
            .ok_or_else(|| ParseConstantError::Overflow(literal.to_string()))?;
        seen = true;
    }

    if seen {
        Ok(magnitude)
    } else {
        Err(ParseConstantError::Empty(literal.to_string()))
    }
}

impl FromStr for IntegerConstant {
    type Err = ParseConstantError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let (negative, body) = split_sign(literal.trim());
        let (radix, digits) = split_radix(body).unwrap_or((10, body));
        let magnitude = parse_magnitude(literal, digits, radix)?;
        Ok(IntegerConstant::from_parts(negative, magnitude))
    }
}

/// Decimal literal `digits * 10^exponent`, without leading or trailing zeros in `digits`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: String,
    exponent: i64,
}

impl Decimal {
    fn scan(literal: &str, body: &str) -> Result<Self, ParseConstantError> {
        let invalid = |digit: char| ParseConstantError::InvalidDigit {
            literal: literal.to_string(),
            digit,
        };

        let (mantissa, written_exponent) = match body.find(['e', 'E']) {
            Some(at) => (&body[..at], Some(&body[at + 1..])),
            None => (body, None),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let mut digits = String::with_capacity(mantissa.len());
        for c in integer.chars().chain(fraction.chars()).filter(|&c| c != '_') {
            if !c.is_ascii_digit() {
                return Err(invalid(c));
            }
            digits.push(c);
        }
        if digits.is_empty() {
            return Err(ParseConstantError::Empty(literal.to_string()));
        }

        let mut exponent = 0i64;
        if let Some(written) = written_exponent {
            let (negative, written) = split_sign(written);
            let mut seen = false;
            for c in written.chars().filter(|&c| c != '_') {
                let digit = c.to_digit(10).ok_or_else(|| invalid(c))?;
                // saturate: anything this large is rejected below anyway
                exponent = exponent.saturating_mul(10).saturating_add(digit as i64);
                seen = true;
            }
            if !seen {
                return Err(ParseConstantError::Empty(literal.to_string()));
            }
            if negative {
                exponent = -exponent;
            }
        }

        let fraction_digits = fraction.chars().filter(|&c| c != '_').count() as i64;
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Ok(Self {
                digits: "0".into(),
                exponent: 0,
            });
        }

        // `trimmed * 10^exponent`, then bounded as `d.ddd * 10^scientific`
        let exponent = exponent
            .saturating_sub(fraction_digits)
            .saturating_add((significant.len() - trimmed.len()) as i64);
        let scientific = exponent.saturating_add(trimmed.len() as i64 - 1);
        if scientific.unsigned_abs() > MAX_DECIMAL_EXPONENT as u64 {
            return Err(ParseConstantError::ExponentOutOfRange {
                literal: literal.to_string(),
                exponent: scientific,
                max: MAX_DECIMAL_EXPONENT,
            });
        }

        Ok(Self {
            digits: trimmed.to_string(),
            exponent,
        })
    }

    /// Rounds to a 64-bit significand, returning `(significand, binary exponent)`.
    fn to_binary(&self) -> (u64, i64) {
        let mantissa = BigUint::parse_bytes(self.digits.as_bytes(), 10).unwrap_or_default();
        if mantissa.bits() == 0 {
            return (0, 0);
        }

        let ten = BigUint::from(10u32);
        let power = ten.pow(self.exponent.unsigned_abs() as u32);
        if self.exponent >= 0 {
            return round_to_significand(mantissa * power, 0, false);
        }

        // Scale so that the quotient has 65 or 66 bits, then round the excess away.
        let shift = 65 + power.bits() as i64 - mantissa.bits() as i64;
        let (numerator, denominator) = if shift >= 0 {
            (mantissa << shift as u64, power)
        } else {
            (mantissa, power << shift.unsigned_abs())
        };
        let quotient = &numerator / &denominator;
        let sticky = (&numerator % &denominator).bits() != 0;
        round_to_significand(quotient, -shift, sticky)
    }
}

fn low_u64(value: &BigUint) -> u64 {
    value.iter_u64_digits().next().unwrap_or(0)
}

/// Rounds `value * 2^exponent` to 64 significant bits. `sticky` tells whether nonzero
/// bits were already discarded below `value`.
fn round_to_significand(value: BigUint, exponent: i64, sticky: bool) -> (u64, i64) {
    let bits = value.bits();
    if bits <= 64 {
        return (low_u64(&value), exponent);
    }

    let extra = bits - 64;
    let truncated = low_u64(&(&value >> extra));
    let dropped = &value - (BigUint::from(truncated) << extra);
    let half = BigUint::from(1u8) << (extra - 1);
    let exponent = exponent + extra as i64;

    let round_up = dropped > half || (dropped == half && (sticky || truncated & 1 == 1));
    if !round_up {
        return (truncated, exponent);
    }
    match truncated.checked_add(1) {
        Some(significand) => (significand, exponent),
        None => (1 << 63, exponent + 1),
    }
}

impl FromStr for RealConstant {
    type Err = ParseConstantError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let (negative, body) = split_sign(literal.trim());

        if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            let infinity = RealConstant::INFINITY;
            return Ok(if negative { -infinity } else { infinity });
        }
        if body.eq_ignore_ascii_case("nan") {
            return Ok(RealConstant::NAN);
        }

        let decimal = Decimal::scan(literal, body)?;
        let (significand, exponent) = decimal.to_binary();
        let exponent =
            i32::try_from(exponent).map_err(|_| ParseConstantError::ExponentOutOfRange {
                literal: literal.to_string(),
                exponent: decimal.exponent,
                max: MAX_DECIMAL_EXPONENT,
            })?;
        Ok(RealConstant::from_parts(negative, significand, exponent))
    }
}

/// Picks the kind from the spelling: radix prefixes and plain digits read as integers,
/// anything with a fraction, an exponent, or a non-finite name reads as a real.
impl FromStr for AnyConstant {
    type Err = ParseConstantError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let (_, body) = split_sign(literal.trim());
        let integral = split_radix(body).is_some()
            || body.chars().all(|c| c.is_ascii_digit() || c == '_');
        if integral {
            literal.parse().map(AnyConstant::Int)
        } else {
            literal.parse().map(AnyConstant::Real)
        }
    }
}

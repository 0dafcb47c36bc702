//! Hyval: value-preserving untyped numeric constants.
//!
//! An untyped constant holds a number without committing to a fixed-width type. It only
//! becomes a concrete primitive when it is consumed, and that consumption is checked:
//! overflow, truncation, sign loss or lost fractional bits are reported with a
//! [`ValuePreservingCastError`] pointing at the offending expression, never silently
//! applied.
//!
//! Two kinds are provided:
//! - [`IntegerConstant`]: sign and 64-bit magnitude (see [`lift_signed`], [`lift_unsigned`]);
//! - [`RealConstant`]: extended binary real with a 64-bit significand (see [`lift_real`]).
//!
//! Both convert through one primitive, `convert_to::<T>()`, and both mix with primitive
//! values through the usual operators, which run the same check before delegating to
//! the native operation (see [`ops`]).
//!
//! Examples
//! ```
//! use hyval::{lift_real, lift_signed, lift_unsigned};
//!
//! // explicit conversions
//! assert_eq!(lift_signed(i32::MIN as i64).convert_to::<i32>(), Ok(i32::MIN));
//! assert!(lift_unsigned(0x8000).convert_to::<i16>().is_err());
//! assert!(lift_unsigned(0x100_0001).convert_to::<f32>().is_err());
//! assert!(lift_real(0.1).convert_to::<f32>().is_err());
//!
//! // operators with primitives
//! let mut c: i16 = 100;
//! c += lift_unsigned(0x7000);
//! assert_eq!(c, 0x7064_i16);
//! assert!(c < lift_unsigned(0x7fff));
//!
//! let mut b: f32 = (-lift_unsigned(0xf000_0000_0000_0000)).cast();
//! b *= lift_unsigned(2);
//! b += lift_real(0.5);
//! ```
//!
//! Conversions are also available as `const fn`, so a narrowing constant initializer
//! is a build error:
//! ```compile_fail
//! const TOO_WIDE: i16 = hyval::lift_unsigned(0x8000).to_i16();
//! ```
//! ```
//! const MIN: i32 = hyval::lift_signed(-0x8000_0000).to_i32();
//! const HALF: f32 = hyval::lift_real(0.5).to_f32();
//! assert_eq!(MIN, i32::MIN);
//! assert_eq!(HALF, 0.5_f32);
//! ```
//!
//! Operations that depend on a bit width or on a boolean reading of the value are not
//! provided. Convert first, then apply them:
//! ```compile_fail
//! let flipped = !hyval::lift_unsigned(1);
//! ```
//! ```compile_fail
//! let flipped = !hyval::lift_real(1.0);
//! ```
//!
//! Callers wanting another name for the library simply rename it on import
//! (`use hyval as val;`).

/// Conversion check shared by both constant kinds.
pub mod check;
/// Untyped constant kinds.
pub mod consts;
/// Error types.
pub mod error;
pub mod ops;
/// Literal front door (`FromStr` implementations).
pub mod parse;
/// Primitive conversion targets.
pub mod target;

pub use check::{Checked, Limits};
pub use consts::{AnyConstant, int::IntegerConstant, real::RealConstant};
pub use error::{ParseConstantError, ValuePreservingCastError};
pub use target::Arithmetic;

/// Lifts a signed value into an [`IntegerConstant`]. Always succeeds.
#[inline]
pub const fn lift_signed(value: i64) -> IntegerConstant {
    IntegerConstant::lift_signed(value)
}

/// Lifts an unsigned value into an [`IntegerConstant`]. Always succeeds.
#[inline]
pub const fn lift_unsigned(value: u64) -> IntegerConstant {
    IntegerConstant::lift_unsigned(value)
}

/// Lifts a floating-point value into a [`RealConstant`]. Always succeeds.
#[inline]
pub const fn lift_real(value: f64) -> RealConstant {
    RealConstant::lift(value)
}

/// Common imports.
pub mod prelude {
    pub use crate::{
        AnyConstant, Arithmetic, IntegerConstant, RealConstant, ValuePreservingCastError,
        lift_real, lift_signed, lift_unsigned,
    };
}

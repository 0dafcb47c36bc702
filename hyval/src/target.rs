//! Concrete arithmetic targets
//!
//! [`Arithmetic`] is implemented for every primitive integer and floating-point type. It
//! exposes the [`Limits`] the conversion check runs against, and the final cast applied
//! to a value the check has already accepted.
//!
//! Each target also gets a `const fn to_<type>` on both constant kinds. Those are meant
//! for `const`/`static` initializers: a conversion that would change the value aborts
//! constant evaluation, which turns it into a build error.
use std::fmt;

use crate::{
    check::{Checked, Limits},
    consts::{int::IntegerConstant, real::RealConstant},
    error::ValuePreservingCastError,
};

pub(crate) mod arith_sealed {
    pub trait Sealed {}
}

/// A primitive type an untyped constant can be converted to.
///
/// This trait is sealed: the check relies on the exact layout of the primitive types.
pub trait Arithmetic:
    arith_sealed::Sealed + Copy + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    /// Values representable by the type.
    const LIMITS: Limits;

    /// Performs the final cast of a value already accepted against [`Self::LIMITS`].
    fn from_checked(checked: Checked) -> Self;
}

macro_rules! define_arithmetic {
    (integral $($ty:ident => $method:ident),+ $(,)?) => {
        $(
            impl arith_sealed::Sealed for $ty {}

            impl Arithmetic for $ty {
                const LIMITS: Limits = Limits::Integral {
                    lowest_magnitude: ($ty::MIN as i128).unsigned_abs(),
                    max: $ty::MAX as u128,
                };

                #[inline]
                fn from_checked(checked: Checked) -> Self {
                    match checked {
                        Checked::Integral { negative: true, magnitude } => {
                            (magnitude as i128).wrapping_neg() as $ty
                        }
                        Checked::Integral { negative: false, magnitude } => magnitude as $ty,
                        Checked::Floating(_) => unreachable!("integral limits accept integral values only"),
                    }
                }
            }

            define_arithmetic!(@common $ty => $method,
                Checked::Integral { negative, magnitude } => {
                    if negative {
                        (magnitude as i128).wrapping_neg() as $ty
                    } else {
                        magnitude as $ty
                    }
                }
            );
        )+
    };

    (floating $($ty:ident => $method:ident),+ $(,)?) => {
        $(
            impl arith_sealed::Sealed for $ty {}

            impl Arithmetic for $ty {
                const LIMITS: Limits = Limits::Floating {
                    digits: $ty::MANTISSA_DIGITS,
                    min_exp: $ty::MIN_EXP,
                    max_exp: $ty::MAX_EXP,
                };

                #[inline]
                fn from_checked(checked: Checked) -> Self {
                    match checked {
                        Checked::Floating(value) => value as $ty,
                        Checked::Integral { .. } => unreachable!("floating limits accept floating values only"),
                    }
                }
            }

            define_arithmetic!(@common $ty => $method, Checked::Floating(value) => value as $ty);
        )+
    };

    (@common $ty:ident => $method:ident, $accepted:pat => $cast:expr) => {
        impl IntegerConstant {
            #[doc = concat!("Converts to `", stringify!($ty), "` during constant evaluation.")]
            ///
            /// # Panics
            ///
            /// Panics when the value is not representable, which makes a `const`
            /// initializer fail to compile.
            #[inline]
            pub const fn $method(self) -> $ty {
                match self.check(<$ty as Arithmetic>::LIMITS) {
                    Ok($accepted) => $cast,
                    _ => panic!("conversion is not value preserving"),
                }
            }
        }

        impl RealConstant {
            #[doc = concat!("Converts to `", stringify!($ty), "` during constant evaluation.")]
            ///
            /// # Panics
            ///
            /// Panics when the value is not representable, which makes a `const`
            /// initializer fail to compile.
            #[inline]
            pub const fn $method(self) -> $ty {
                match self.check(<$ty as Arithmetic>::LIMITS) {
                    Ok($accepted) => $cast,
                    _ => panic!("conversion is not value preserving"),
                }
            }
        }

        impl TryFrom<IntegerConstant> for $ty {
            type Error = ValuePreservingCastError;

            #[track_caller]
            #[inline]
            fn try_from(value: IntegerConstant) -> Result<Self, Self::Error> {
                value.convert_to()
            }
        }

        impl TryFrom<RealConstant> for $ty {
            type Error = ValuePreservingCastError;

            #[track_caller]
            #[inline]
            fn try_from(value: RealConstant) -> Result<Self, Self::Error> {
                value.convert_to()
            }
        }
    };
}

define_arithmetic!(integral
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
    isize => to_isize,
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    u128 => to_u128,
    usize => to_usize,
);

define_arithmetic!(floating
    f32 => to_f32,
    f64 => to_f64,
);

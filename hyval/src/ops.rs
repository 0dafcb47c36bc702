//! Operator overlay.
//!
//! Lets untyped constants take part in expressions with primitive values, on either
//! side of the operator. Every operator converts the constant to the primitive type of
//! the other operand first (with [`IntegerConstant::cast`] / [`RealConstant::cast`]),
//! then applies the native operator:
//!
//! - `+ - * /` and their assignments, for every primitive target;
//! - `% & | ^` and their assignments, for integer targets only;
//! - `== != < <= > >=`, for every primitive target.
//!
//! A conversion that would change the value panics at the call site before the native
//! operator runs, so `x += c` leaves `x` untouched when `c` does not fit.
use std::{cmp::Ordering, ops};

use crate::consts::{int::IntegerConstant, real::RealConstant};

macro_rules! define_ops_binary {
    ($constant:ty => $target:ty, $op_trait:ident :: $op:ident, $assign_trait:ident :: $assign:ident) => {
        impl ops::$op_trait<$constant> for $target {
            type Output = $target;

            #[track_caller]
            #[inline]
            fn $op(self, rhs: $constant) -> $target {
                let rhs = rhs.cast::<$target>();
                ops::$op_trait::$op(self, rhs)
            }
        }

        impl ops::$op_trait<$target> for $constant {
            type Output = $target;

            #[track_caller]
            #[inline]
            fn $op(self, rhs: $target) -> $target {
                let lhs = self.cast::<$target>();
                ops::$op_trait::$op(lhs, rhs)
            }
        }

        impl ops::$assign_trait<$constant> for $target {
            #[track_caller]
            #[inline]
            fn $assign(&mut self, rhs: $constant) {
                let rhs = rhs.cast::<$target>();
                ops::$assign_trait::$assign(self, rhs);
            }
        }
    };
}

macro_rules! define_ops_compare {
    ($constant:ty => $target:ty) => {
        impl PartialEq<$constant> for $target {
            #[track_caller]
            #[inline]
            fn eq(&self, other: &$constant) -> bool {
                *self == other.cast::<$target>()
            }
        }

        impl PartialEq<$target> for $constant {
            #[track_caller]
            #[inline]
            fn eq(&self, other: &$target) -> bool {
                self.cast::<$target>() == *other
            }
        }

        impl PartialOrd<$constant> for $target {
            #[track_caller]
            #[inline]
            fn partial_cmp(&self, other: &$constant) -> Option<Ordering> {
                self.partial_cmp(&other.cast::<$target>())
            }
        }

        impl PartialOrd<$target> for $constant {
            #[track_caller]
            #[inline]
            fn partial_cmp(&self, other: &$target) -> Option<Ordering> {
                self.cast::<$target>().partial_cmp(other)
            }
        }
    };
}

macro_rules! define_ops_constant {
    (arithmetic $constant:ty => $($target:ty),+ $(,)?) => {
        $(
            define_ops_binary!($constant => $target, Add::add, AddAssign::add_assign);
            define_ops_binary!($constant => $target, Sub::sub, SubAssign::sub_assign);
            define_ops_binary!($constant => $target, Mul::mul, MulAssign::mul_assign);
            define_ops_binary!($constant => $target, Div::div, DivAssign::div_assign);
            define_ops_compare!($constant => $target);
        )+
    };
    (integral $constant:ty => $($target:ty),+ $(,)?) => {
        $(
            define_ops_binary!($constant => $target, Rem::rem, RemAssign::rem_assign);
            define_ops_binary!($constant => $target, BitAnd::bitand, BitAndAssign::bitand_assign);
            define_ops_binary!($constant => $target, BitOr::bitor, BitOrAssign::bitor_assign);
            define_ops_binary!($constant => $target, BitXor::bitxor, BitXorAssign::bitxor_assign);
        )+
    };
}

define_ops_constant!(arithmetic IntegerConstant =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
define_ops_constant!(integral IntegerConstant =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

define_ops_constant!(arithmetic RealConstant =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
define_ops_constant!(integral RealConstant =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

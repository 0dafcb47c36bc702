use std::{fmt, ops::Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};

use crate::{
    consts::{int::IntegerConstant, real::RealConstant},
    error::ValuePreservingCastError,
    target::Arithmetic,
};

pub mod int;
pub mod real;

/// Either kind of untyped constant, as produced by reading a literal whose kind is
/// only known from its spelling.
#[derive(Debug, Clone, Copy, PartialEq, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnyConstant {
    Int(IntegerConstant),
    Real(RealConstant),
}

impl AnyConstant {
    /// Converts the held constant to `T`; see [`IntegerConstant::convert_to`] and
    /// [`RealConstant::convert_to`].
    #[track_caller]
    pub fn convert_to<T: Arithmetic>(self) -> Result<T, ValuePreservingCastError> {
        match self {
            AnyConstant::Int(c) => c.convert_to(),
            AnyConstant::Real(c) => c.convert_to(),
        }
    }

    /// Same as [`AnyConstant::convert_to`], but panics at the caller on failure.
    #[track_caller]
    pub fn cast<T: Arithmetic>(self) -> T {
        match self {
            AnyConstant::Int(c) => c.cast(),
            AnyConstant::Real(c) => c.cast(),
        }
    }

    pub fn fits_in<T: Arithmetic>(self) -> bool {
        match self {
            AnyConstant::Int(c) => c.fits_in::<T>(),
            AnyConstant::Real(c) => c.fits_in::<T>(),
        }
    }

    /// Promotes to a real constant. Never loses information.
    pub fn to_real(self) -> RealConstant {
        match self {
            AnyConstant::Int(c) => c.into(),
            AnyConstant::Real(c) => c,
        }
    }
}

impl Neg for AnyConstant {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            AnyConstant::Int(c) => AnyConstant::Int(-c),
            AnyConstant::Real(c) => AnyConstant::Real(-c),
        }
    }
}

impl From<IntegerConstant> for AnyConstant {
    fn from(value: IntegerConstant) -> Self {
        AnyConstant::Int(value)
    }
}

impl From<RealConstant> for AnyConstant {
    fn from(value: RealConstant) -> Self {
        AnyConstant::Real(value)
    }
}

impl fmt::Display for AnyConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyConstant::Int(c) => write!(f, "{c}"),
            AnyConstant::Real(c) => write!(f, "{c}"),
        }
    }
}

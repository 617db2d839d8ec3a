use crate::types::Scalar;
use std::ops::{Add, Div, Mul, Sub};

/// Arithmetic and transcendental capabilities the interpreter needs from its
/// working type.
///
/// Implemented for `f32`, `f64` and [`Dual`](super::dual::Dual). The
/// interpreter is monomorphized per implementation.
pub trait Numeric:
    Copy
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    fn from_scalar(value: Scalar) -> Self;

    /// Largest finite value, the substitute for NaN and infinities
    fn max_finite() -> Self;

    fn is_finite(self) -> bool;

    fn ln(self) -> Self;
    fn exp(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;

    fn square(self) -> Self {
        self * self
    }

    #[inline]
    fn finite_or_max(self) -> Self {
        if self.is_finite() {
            self
        } else {
            Self::max_finite()
        }
    }
}

macro_rules! impl_numeric_float {
    ($t:ty) => {
        impl Numeric for $t {
            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                value as $t
            }

            #[inline]
            fn max_finite() -> Self {
                <$t>::MAX
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn ln(self) -> Self {
                <$t>::ln(self)
            }

            #[inline]
            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            #[inline]
            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                <$t>::tan(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn cbrt(self) -> Self {
                <$t>::cbrt(self)
            }
        }
    };
}

impl_numeric_float!(f32);
impl_numeric_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_max() {
        assert_eq!(f64::NAN.finite_or_max(), f64::MAX);
        assert_eq!(f64::NEG_INFINITY.finite_or_max(), f64::MAX);
        assert_eq!(2.5f64.finite_or_max(), 2.5);
        assert_eq!(f32::INFINITY.finite_or_max(), f32::MAX);
    }

    #[test]
    fn test_cast_from_scalar() {
        assert_eq!(<f32 as Numeric>::from_scalar(0.5), 0.5f32);
        assert_eq!(Numeric::square(3.0f64), 9.0);
    }
}

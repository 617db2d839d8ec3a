use super::numeric::Numeric;
use crate::types::Scalar;
use num_traits::Float;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Forward-mode dual number: a value and its derivative along one direction.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Dual<T: Float> {
    pub val: T,
    pub eps: T,
}

impl<T: Float> Dual<T> {
    pub fn new(val: T, eps: T) -> Self {
        Self { val, eps }
    }

    /// Derivative zero
    pub fn constant(val: T) -> Self {
        Self::new(val, T::zero())
    }

    /// Seeded with derivative one
    pub fn variable(val: T) -> Self {
        Self::new(val, T::one())
    }
}

impl<T: Float + fmt::Display> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.val, self.eps)
    }
}

impl<T: Float> Add for Dual<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl<T: Float> Sub for Dual<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl<T: Float> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Product rule
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl<T: Float> Div for Dual<T> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        // Quotient rule
        let val = self.val / rhs.val;
        let eps = (self.eps * rhs.val - self.val * rhs.eps) / (rhs.val * rhs.val);
        Self::new(val, eps)
    }
}

impl<T: Float> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl<T> Numeric for Dual<T>
where
    T: Float + Send + Sync + 'static,
{
    fn from_scalar(value: Scalar) -> Self {
        Self::constant(T::from(value).unwrap_or_else(T::nan))
    }

    fn max_finite() -> Self {
        Self::constant(T::max_value())
    }

    fn is_finite(self) -> bool {
        self.val.is_finite() && self.eps.is_finite()
    }

    fn ln(self) -> Self {
        Self::new(self.val.ln(), self.eps / self.val)
    }

    fn exp(self) -> Self {
        let e = self.val.exp();
        Self::new(e, self.eps * e)
    }

    fn sin(self) -> Self {
        Self::new(self.val.sin(), self.eps * self.val.cos())
    }

    fn cos(self) -> Self {
        Self::new(self.val.cos(), -self.eps * self.val.sin())
    }

    fn tan(self) -> Self {
        let t = self.val.tan();
        Self::new(t, self.eps * (T::one() + t * t))
    }

    fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        let two = T::one() + T::one();
        Self::new(s, self.eps / (two * s))
    }

    fn cbrt(self) -> Self {
        let c = self.val.cbrt();
        let three = T::one() + T::one() + T::one();
        Self::new(c, self.eps / (three * c * c))
    }
}

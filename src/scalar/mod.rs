// ============================================================================
// Scalar Module
// Real and complex values bound to a precision context
// ============================================================================

mod complex;
mod real;
mod snap;

pub use complex::ComplexScalar;
pub use real::RealScalar;
pub use snap::Barrier;

use crate::domain::PrecisionContext;
use std::fmt;
use std::ops::Sub;
use std::sync::Arc;

/// Either kind of scalar, as produced by [`PrecisionContext::convert`].
#[derive(Debug, Clone)]
pub enum Scalar {
    Real(RealScalar),
    Complex(ComplexScalar),
}

impl Scalar {
    pub fn context(&self) -> &Arc<PrecisionContext> {
        match self {
            Scalar::Real(r) => r.context(),
            Scalar::Complex(c) => c.context(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Real(r) => r.is_zero(),
            Scalar::Complex(c) => c.is_zero(),
        }
    }

    pub fn is_nan(&self) -> bool {
        match self {
            Scalar::Real(r) => r.is_nan(),
            Scalar::Complex(c) => c.is_nan(),
        }
    }

    pub fn as_real(&self) -> Option<&RealScalar> {
        match self {
            Scalar::Real(r) => Some(r),
            Scalar::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexScalar> {
        match self {
            Scalar::Real(_) => None,
            Scalar::Complex(c) => Some(c),
        }
    }

    /// The value as a complex scalar (reals get a zero imaginary part).
    pub fn to_complex(&self) -> ComplexScalar {
        match self {
            Scalar::Real(r) => ComplexScalar::from_real(r),
            Scalar::Complex(c) => c.clone(),
        }
    }

    /// Magnitude: absolute value for reals, modulus for complex values.
    pub fn abs(&self) -> RealScalar {
        match self {
            Scalar::Real(r) => r.abs(),
            Scalar::Complex(c) => c.abs(),
        }
    }
}

/// Real minus real stays real; anything involving a complex value is complex.
impl<'a> Sub<&'a Scalar> for &'a Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'a Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Real(a), Scalar::Real(b)) => Scalar::Real(a - b),
            _ => Scalar::Complex(&self.to_complex() - &rhs.to_complex()),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Real(a), Scalar::Real(b)) => a == b,
            _ => self.to_complex() == other.to_complex(),
        }
    }
}

impl From<RealScalar> for Scalar {
    fn from(value: RealScalar) -> Self {
        Scalar::Real(value)
    }
}

impl From<ComplexScalar> for Scalar {
    fn from(value: ComplexScalar) -> Self {
        Scalar::Complex(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Real(r) => fmt::Display::fmt(r, f),
            Scalar::Complex(c) => fmt::Display::fmt(c, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_subtraction_promotes() {
        let ctx = PrecisionContext::double().unwrap();
        let x = ctx.convert(3).unwrap();
        let j = Scalar::Complex(ctx.imaginary_unit());

        let diff = &x - &j;
        let z = diff.as_complex().unwrap();
        assert_eq!(z.re(), ctx.convert_real(3).unwrap());
        assert_eq!(z.im(), ctx.convert_real(-1).unwrap());

        let real_diff = &x - &x;
        assert!(real_diff.as_real().unwrap().is_zero());
    }

    #[test]
    fn test_mixed_equality() {
        let ctx = PrecisionContext::double().unwrap();
        let x = ctx.convert(2).unwrap();
        let z = Scalar::Complex(ComplexScalar::from_real(x.as_real().unwrap()));
        assert_eq!(x, z);
        assert!(x.abs() == ctx.convert_real(2).unwrap());
    }
}

// ============================================================================
// Real Scalar
// Context-bound multiprecision real with a snapping write barrier
// ============================================================================

use crate::domain::PrecisionContext;
use crate::numeric::backend;
use crate::numeric::{BigFloat, DomainResult};
use num_rational::BigRational;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// A real value of a [`PrecisionContext`].
///
/// The stored float is always the barrier's output: there is no way to put
/// a raw engine value into a scalar without passing through
/// [`from_raw`](Self::from_raw) or [`assign`](Self::assign).
///
/// Arithmetic results are rounded at, and snapped under, the context of the
/// left operand.
#[derive(Clone)]
pub struct RealScalar {
    ctx: Arc<PrecisionContext>,
    bits: BigFloat,
}

impl RealScalar {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a scalar from a raw engine value under `ctx`.
    ///
    /// This is the seam arithmetic code goes through; the value is snapped
    /// to exact zero if its magnitude is below the context tolerance.
    pub fn from_raw(ctx: &Arc<PrecisionContext>, raw: BigFloat) -> Self {
        Self {
            bits: ctx.barrier().snap(raw),
            ctx: Arc::clone(ctx),
        }
    }

    /// Replace the stored value, through the barrier.
    pub fn assign(&mut self, raw: BigFloat) {
        self.bits = self.ctx.barrier().snap(raw);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The stored (snapped) engine value.
    #[inline]
    pub fn bits(&self) -> &BigFloat {
        &self.bits
    }

    #[inline]
    pub fn into_bits(self) -> BigFloat {
        self.bits
    }

    #[inline]
    pub fn context(&self) -> &Arc<PrecisionContext> {
        &self.ctx
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.bits.is_zero()
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.bits.is_nan()
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.bits.is_inf()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Strictly positive (including +inf).
    pub fn is_positive(&self) -> bool {
        backend::less_than(&backend::zero(self.precision()), &self.bits)
    }

    /// Strictly negative (including -inf).
    pub fn is_negative(&self) -> bool {
        backend::less_than(&self.bits, &backend::zero(self.precision()))
    }

    /// Exact rational value, optionally limited to the context's denominator bound.
    pub fn to_rational(&self, limit: bool) -> DomainResult<BigRational> {
        self.ctx.to_rational(self, limit)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    #[inline]
    fn precision(&self) -> usize {
        self.ctx.precision_bits()
    }

    pub fn abs(&self) -> Self {
        Self::from_raw(&self.ctx, BigFloat::abs(&self.bits))
    }

    /// Square root at the working precision.
    pub fn sqrt(&self) -> Self {
        let raw = backend::sqrt(&self.bits, self.precision(), self.ctx.rounding());
        Self::from_raw(&self.ctx, raw)
    }

    /// The larger of two values; NaN loses.
    pub fn max<'a>(&'a self, other: &'a Self) -> &'a Self {
        match backend::compare(&self.bits, &other.bits) {
            Some(Ordering::Less) => other,
            None if self.is_nan() => other,
            _ => self,
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

macro_rules! real_binop {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait<&'a RealScalar> for &'a RealScalar {
            type Output = RealScalar;

            fn $method(self, rhs: &'a RealScalar) -> RealScalar {
                let rounding = self.ctx.rounding();
                let raw = backend::$method(&self.bits, &rhs.bits, self.precision(), rounding);
                RealScalar::from_raw(&self.ctx, raw)
            }
        }

        impl $trait for RealScalar {
            type Output = RealScalar;

            #[inline]
            fn $method(self, rhs: RealScalar) -> RealScalar {
                (&self).$method(&rhs)
            }
        }
    };
}

real_binop!(Add, add);
real_binop!(Sub, sub);
real_binop!(Mul, mul);
real_binop!(Div, div);

impl Neg for &RealScalar {
    type Output = RealScalar;

    fn neg(self) -> RealScalar {
        RealScalar::from_raw(&self.ctx, BigFloat::neg(&self.bits))
    }
}

impl Neg for RealScalar {
    type Output = RealScalar;

    #[inline]
    fn neg(self) -> RealScalar {
        -&self
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Numeric equality of the stored values; NaN is never equal.
impl PartialEq for RealScalar {
    fn eq(&self, other: &Self) -> bool {
        backend::compare(&self.bits, &other.bits) == Some(Ordering::Equal)
    }
}

impl PartialOrd for RealScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        backend::compare(&self.bits, &other.bits)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for RealScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealScalar")
            .field("bits", &self.bits)
            .field("context", &self.ctx.id())
            .finish()
    }
}

impl fmt::Display for RealScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

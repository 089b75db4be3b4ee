// ============================================================================
// Complex Scalar
// Pair of multiprecision components, each snapped on its own
// ============================================================================

use super::real::RealScalar;
use crate::domain::PrecisionContext;
use crate::numeric::backend;
use crate::numeric::{BigFloat, Rounding};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// A complex value of a [`PrecisionContext`].
///
/// Real and imaginary parts pass the barrier independently: a tiny real
/// part next to a large imaginary part is zeroed while the imaginary part is
/// kept, and vice versa. There is no norm-based variant.
#[derive(Clone)]
pub struct ComplexScalar {
    ctx: Arc<PrecisionContext>,
    re: BigFloat,
    im: BigFloat,
}

impl ComplexScalar {
    /// Build a scalar from raw engine components under `ctx`.
    pub fn from_raw(ctx: &Arc<PrecisionContext>, re: BigFloat, im: BigFloat) -> Self {
        let barrier = ctx.barrier();
        Self {
            re: barrier.snap(re),
            im: barrier.snap(im),
            ctx: Arc::clone(ctx),
        }
    }

    /// Promote a real scalar, keeping its context.
    pub fn from_real(value: &RealScalar) -> Self {
        let ctx = value.context();
        Self::from_raw(
            ctx,
            value.bits().clone(),
            backend::zero(ctx.precision_bits()),
        )
    }

    /// Replace both components, through the barrier.
    pub fn assign(&mut self, re: BigFloat, im: BigFloat) {
        let barrier = self.ctx.barrier();
        self.re = barrier.snap(re);
        self.im = barrier.snap(im);
    }

    #[inline]
    pub fn re_bits(&self) -> &BigFloat {
        &self.re
    }

    #[inline]
    pub fn im_bits(&self) -> &BigFloat {
        &self.im
    }

    #[inline]
    pub fn context(&self) -> &Arc<PrecisionContext> {
        &self.ctx
    }

    pub fn re(&self) -> RealScalar {
        RealScalar::from_raw(&self.ctx, self.re.clone())
    }

    pub fn im(&self) -> RealScalar {
        RealScalar::from_raw(&self.ctx, self.im.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn conj(&self) -> Self {
        Self::from_raw(&self.ctx, self.re.clone(), BigFloat::neg(&self.im))
    }

    /// Modulus `sqrt(re^2 + im^2)` as a real scalar.
    pub fn abs(&self) -> RealScalar {
        let (p, rounding) = self.params();
        let norm = backend::add(
            &backend::mul(&self.re, &self.re, p, rounding),
            &backend::mul(&self.im, &self.im, p, rounding),
            p,
            rounding,
        );
        RealScalar::from_raw(&self.ctx, backend::sqrt(&norm, p, rounding))
    }

    #[inline]
    fn params(&self) -> (usize, Rounding) {
        (self.ctx.precision_bits(), self.ctx.rounding())
    }
}

// ============================================================================
// Operators
// ============================================================================

impl<'a> Add<&'a ComplexScalar> for &'a ComplexScalar {
    type Output = ComplexScalar;

    fn add(self, rhs: &'a ComplexScalar) -> ComplexScalar {
        let (p, rounding) = self.params();
        ComplexScalar::from_raw(
            &self.ctx,
            backend::add(&self.re, &rhs.re, p, rounding),
            backend::add(&self.im, &rhs.im, p, rounding),
        )
    }
}

impl<'a> Sub<&'a ComplexScalar> for &'a ComplexScalar {
    type Output = ComplexScalar;

    fn sub(self, rhs: &'a ComplexScalar) -> ComplexScalar {
        let (p, rounding) = self.params();
        ComplexScalar::from_raw(
            &self.ctx,
            backend::sub(&self.re, &rhs.re, p, rounding),
            backend::sub(&self.im, &rhs.im, p, rounding),
        )
    }
}

impl<'a> Mul<&'a ComplexScalar> for &'a ComplexScalar {
    type Output = ComplexScalar;

    /// `(a + bi)(c + di) = (ac - bd) + (ad + bc)i`
    fn mul(self, rhs: &'a ComplexScalar) -> ComplexScalar {
        let (p, rounding) = self.params();
        let ac = backend::mul(&self.re, &rhs.re, p, rounding);
        let bd = backend::mul(&self.im, &rhs.im, p, rounding);
        let ad = backend::mul(&self.re, &rhs.im, p, rounding);
        let bc = backend::mul(&self.im, &rhs.re, p, rounding);
        ComplexScalar::from_raw(
            &self.ctx,
            backend::sub(&ac, &bd, p, rounding),
            backend::add(&ad, &bc, p, rounding),
        )
    }
}

impl<'a> Div<&'a ComplexScalar> for &'a ComplexScalar {
    type Output = ComplexScalar;

    /// `(a + bi)/(c + di) = ((ac + bd) + (bc - ad)i) / (c^2 + d^2)`
    fn div(self, rhs: &'a ComplexScalar) -> ComplexScalar {
        let (p, rounding) = self.params();
        let denom = backend::add(
            &backend::mul(&rhs.re, &rhs.re, p, rounding),
            &backend::mul(&rhs.im, &rhs.im, p, rounding),
            p,
            rounding,
        );
        let ac = backend::mul(&self.re, &rhs.re, p, rounding);
        let bd = backend::mul(&self.im, &rhs.im, p, rounding);
        let bc = backend::mul(&self.im, &rhs.re, p, rounding);
        let ad = backend::mul(&self.re, &rhs.im, p, rounding);
        ComplexScalar::from_raw(
            &self.ctx,
            backend::div(&backend::add(&ac, &bd, p, rounding), &denom, p, rounding),
            backend::div(&backend::sub(&bc, &ad, p, rounding), &denom, p, rounding),
        )
    }
}

macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for ComplexScalar {
            type Output = ComplexScalar;

            #[inline]
            fn $method(self, rhs: ComplexScalar) -> ComplexScalar {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);
forward_owned_binop!(Div, div);

impl Neg for &ComplexScalar {
    type Output = ComplexScalar;

    fn neg(self) -> ComplexScalar {
        ComplexScalar::from_raw(&self.ctx, BigFloat::neg(&self.re), BigFloat::neg(&self.im))
    }
}

impl Neg for ComplexScalar {
    type Output = ComplexScalar;

    #[inline]
    fn neg(self) -> ComplexScalar {
        -&self
    }
}

impl PartialEq for ComplexScalar {
    fn eq(&self, other: &Self) -> bool {
        backend::compare(&self.re, &other.re) == Some(std::cmp::Ordering::Equal)
            && backend::compare(&self.im, &other.im) == Some(std::cmp::Ordering::Equal)
    }
}

impl fmt::Debug for ComplexScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexScalar")
            .field("re", &self.re)
            .field("im", &self.im)
            .field("context", &self.ctx.id())
            .finish()
    }
}

impl fmt::Display for ComplexScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}j)", self.re, self.im)
    }
}

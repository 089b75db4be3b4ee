// ============================================================================
// Scalar Conversion
// Dispatch from external values to context scalars
// ============================================================================

use crate::domain::{PrecisionContext, Value};
use crate::numeric::backend;
use crate::numeric::{DomainError, DomainResult};
use crate::scalar::{ComplexScalar, RealScalar, Scalar};
use num_bigint::BigInt;
use num_rational::BigRational;
use std::sync::Arc;

impl PrecisionContext {
    /// Convert an external value into a scalar of this context.
    ///
    /// Numbers are rounded to the working precision and pass the write
    /// barrier. Scalars of this context are returned as they are; scalars of
    /// another context are re-snapped under this one.
    ///
    /// # Errors
    /// `Conversion` for unparseable text and for any value kind the domain
    /// does not support.
    pub fn convert(self: &Arc<Self>, value: impl Into<Value>) -> DomainResult<Scalar> {
        let p = self.precision_bits();
        let rounding = self.rounding();

        let scalar = match value.into() {
            Value::Integer(i) => self.real(backend::from_integer(i, p)),
            Value::BigInteger(i) => self.real(backend::from_big_integer(&i, p, rounding)),
            Value::Float(f) => self.real(backend::from_float(f, p)),
            Value::Text(text) => {
                let raw = self.with_consts(|cc| backend::from_string(&text, p, rounding, cc));
                match raw {
                    Some(raw) => self.real(raw),
                    None => return Err(cannot_create(format!("{:?}", text))),
                }
            },
            Value::Rational(r) => self.real(self.round_rational(&r)),
            Value::Decimal(d) => {
                let exact = BigRational::new(
                    BigInt::from(d.mantissa()),
                    BigInt::from(10u32).pow(d.scale()),
                );
                self.real(self.round_rational(&exact))
            },
            Value::Complex(z) => Scalar::Complex(ComplexScalar::from_raw(
                self,
                backend::from_float(z.re, p),
                backend::from_float(z.im, p),
            )),
            Value::Real(r) if r.context().same_as(self) => Scalar::Real(r),
            Value::Real(r) => self.real(r.into_bits()),
            Value::ComplexScalar(c) if c.context().same_as(self) => Scalar::Complex(c),
            Value::ComplexScalar(c) => Scalar::Complex(ComplexScalar::from_raw(
                self,
                c.re_bits().clone(),
                c.im_bits().clone(),
            )),
            Value::Foreign(desc) => return Err(cannot_create(desc)),
        };

        Ok(scalar)
    }

    /// Like [`convert`](Self::convert) but only accepts real results.
    pub fn convert_real(self: &Arc<Self>, value: impl Into<Value>) -> DomainResult<RealScalar> {
        match self.convert(value)? {
            Scalar::Real(r) => Ok(r),
            Scalar::Complex(c) => Err(DomainError::conversion(format!(
                "expected a real number, got {}",
                c
            ))),
        }
    }

    fn real(self: &Arc<Self>, raw: crate::numeric::BigFloat) -> Scalar {
        Scalar::Real(RealScalar::from_raw(self, raw))
    }

    fn round_rational(&self, value: &BigRational) -> crate::numeric::BigFloat {
        let (p, rounding) = (self.precision_bits(), self.rounding());
        backend::from_rational(value, p, rounding)
    }
}

fn cannot_create(shown: String) -> DomainError {
    DomainError::conversion(format!("cannot create scalar from {}", shown))
}

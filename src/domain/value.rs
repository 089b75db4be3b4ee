// ============================================================================
// Conversion Inputs
// Everything a context knows how to turn into a scalar
// ============================================================================

use crate::scalar::{ComplexScalar, RealScalar, Scalar};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use rust_decimal::Decimal;

/// An external value handed to [`PrecisionContext::convert`](super::PrecisionContext::convert).
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    BigInteger(BigInt),
    Float(f64),
    /// Decimal literal, parsed at the context precision
    Text(String),
    Rational(BigRational),
    Decimal(Decimal),
    Complex(Complex64),
    Real(RealScalar),
    ComplexScalar(ComplexScalar),
    /// A value of a kind this domain does not understand, by its description
    Foreign(String),
}

impl Value {
    /// Wrap anything printable as an unsupported value.
    pub fn foreign(value: impl std::fmt::Debug) -> Self {
        Value::Foreign(format!("{:?}", value))
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    i64 => Integer,
    i32 => Integer,
    u32 => Integer,
    f64 => Float,
    f32 => Float,
    BigInt => BigInteger,
    BigRational => Rational,
    Decimal => Decimal,
    Complex64 => Complex,
    String => Text,
    &str => Text,
    RealScalar => Real,
    ComplexScalar => ComplexScalar,
}

impl From<&RealScalar> for Value {
    fn from(value: &RealScalar) -> Self {
        Value::Real(value.clone())
    }
}

impl From<&ComplexScalar> for Value {
    fn from(value: &ComplexScalar) -> Self {
        Value::ComplexScalar(value.clone())
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Real(r) => Value::Real(r),
            Scalar::Complex(c) => Value::ComplexScalar(c),
        }
    }
}

impl From<&Scalar> for Value {
    fn from(value: &Scalar) -> Self {
        value.clone().into()
    }
}

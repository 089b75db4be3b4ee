// ============================================================================
// Precision Context
// Owns precision, rounding, tolerance and the derived singletons
// ============================================================================

use super::config::{bits_to_digits, ContextConfig, ToleranceSetting};
use crate::numeric::backend;
use crate::numeric::{BigFloat, DomainError, DomainResult, Rounding};
use crate::scalar::{Barrier, ComplexScalar, RealScalar};
use astro_float::Consts;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Context Identity
// ============================================================================

/// Identity of a precision context; scalars compare contexts by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Singletons
// ============================================================================

/// Special values built once per context, already through the barrier.
struct Singletons {
    zero: BigFloat,
    one: BigFloat,
    pos_infinity: BigFloat,
    neg_infinity: BigFloat,
    nan: BigFloat,
}

impl Singletons {
    fn build(barrier: &Barrier) -> Self {
        let p = barrier.precision_bits();
        Self {
            zero: barrier.snap(backend::zero(p)),
            one: barrier.snap(backend::from_integer(1, p)),
            pos_infinity: barrier.snap(backend::pos_infinity()),
            neg_infinity: barrier.snap(backend::neg_infinity()),
            nan: barrier.snap(backend::nan()),
        }
    }
}

// ============================================================================
// Precision Context
// ============================================================================

/// Shared numeric state for every scalar created under it.
///
/// A context is read-only once built and is handed around as
/// `Arc<PrecisionContext>`. Changing precision builds a new context
/// ([`with_precision`](Self::with_precision)); scalars already created keep
/// their stored value and their original context.
///
/// # Example
/// ```
/// use precision_domain::prelude::*;
///
/// let ctx = PrecisionContext::new(ContextConfig::double()).unwrap();
/// let tiny = ctx.convert("1e-20").unwrap();
/// assert!(tiny.is_zero());
///
/// let three = ctx.convert_real("3.0").unwrap();
/// let r = ctx.to_rational(&three, true).unwrap();
/// assert_eq!(r.to_string(), "3");
/// ```
pub struct PrecisionContext {
    id: ContextId,
    config: ContextConfig,
    barrier: Barrier,
    /// `None` when the tolerance is zero (reconstruction is unbounded)
    max_denominator: Option<BigInt>,
    singletons: Singletons,
    /// Engine constant cache for parsing and named constants
    consts: Mutex<Consts>,
}

impl PrecisionContext {
    /// Build a context from configuration.
    ///
    /// # Errors
    /// - `Config` if both precision forms are set, precision is zero, or the
    ///   tolerance is negative or NaN
    /// - `Conversion` if a text tolerance does not parse
    pub fn new(config: ContextConfig) -> DomainResult<Arc<Self>> {
        config.validate()?;

        let precision_bits = config.resolved_precision_bits();
        let rounding = Rounding::default();
        let mut consts = backend::new_consts()?;

        let tolerance = match &config.tolerance {
            None => default_tolerance(precision_bits, rounding),
            Some(setting) => convert_tolerance(setting, precision_bits, rounding, &mut consts)?,
        };

        if tolerance.is_nan() || backend::less_than(&tolerance, &backend::zero(precision_bits)) {
            return Err(DomainError::config(format!(
                "tolerance must be a non-negative number, got {:?}",
                config.tolerance
            )));
        }

        let max_denominator = backend::floor_reciprocal(&tolerance, precision_bits, rounding);
        if backend::less_or_equal(&backend::from_integer(1, precision_bits), &tolerance) {
            tracing::warn!(
                ?tolerance,
                "tolerance is not below one; rational reconstruction is undefined"
            );
        }

        let barrier = Barrier::new(precision_bits, rounding, tolerance);
        let singletons = Singletons::build(&barrier);
        let id = ContextId::new();

        tracing::debug!(
            %id,
            precision_bits,
            tolerance = ?barrier.tolerance(),
            max_denominator = ?max_denominator,
            "created precision context"
        );

        Ok(Arc::new(Self {
            id,
            config,
            barrier,
            max_denominator,
            singletons,
            consts: Mutex::new(consts),
        }))
    }

    /// Default 53-bit context.
    pub fn double() -> DomainResult<Arc<Self>> {
        Self::new(ContextConfig::double())
    }

    /// A new context at `bits` precision with the same tolerance setting.
    ///
    /// A derived tolerance is recomputed for the new precision; an explicit
    /// one is carried over.
    pub fn with_precision(&self, bits: usize) -> DomainResult<Arc<Self>> {
        let mut config = self.config.clone();
        config.precision_bits = Some(bits);
        config.decimal_digits = None;
        Self::new(config)
    }

    /// A new context at `digits` decimal digits with the same tolerance setting.
    pub fn with_decimal_digits(&self, digits: usize) -> DomainResult<Arc<Self>> {
        let mut config = self.config.clone();
        config.precision_bits = None;
        config.decimal_digits = Some(digits);
        Self::new(config)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    #[inline]
    pub fn precision_bits(&self) -> usize {
        self.barrier.precision_bits()
    }

    pub fn decimal_digits(&self) -> usize {
        bits_to_digits(self.precision_bits())
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.barrier.rounding()
    }

    /// Tolerance as a raw engine value.
    #[inline]
    pub fn tolerance(&self) -> &BigFloat {
        self.barrier.tolerance()
    }

    /// Whether the tolerance was derived from the precision.
    pub fn has_default_tolerance(&self) -> bool {
        self.config.has_default_tolerance()
    }

    /// `floor(1 / tolerance)`; `None` for a zero tolerance.
    pub fn max_denominator(&self) -> Option<&BigInt> {
        self.max_denominator.as_ref()
    }

    /// The write barrier every scalar of this context passes through.
    #[inline]
    pub fn barrier(&self) -> &Barrier {
        &self.barrier
    }

    /// Same identity as `other`.
    #[inline]
    pub fn same_as(&self, other: &PrecisionContext) -> bool {
        self.id == other.id
    }

    /// Run `f` with exclusive access to the engine's constant cache.
    pub(crate) fn with_consts<R>(&self, f: impl FnOnce(&mut Consts) -> R) -> R {
        let mut consts = self.consts.lock();
        f(&mut consts)
    }

    // ========================================================================
    // Singletons and Constants
    // ========================================================================

    pub fn tolerance_scalar(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.tolerance().clone())
    }

    pub fn zero(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.singletons.zero.clone())
    }

    pub fn one(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.singletons.one.clone())
    }

    /// The imaginary unit `j`.
    pub fn imaginary_unit(self: &Arc<Self>) -> ComplexScalar {
        ComplexScalar::from_raw(
            self,
            self.singletons.zero.clone(),
            self.singletons.one.clone(),
        )
    }

    pub fn pos_infinity(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.singletons.pos_infinity.clone())
    }

    pub fn neg_infinity(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.singletons.neg_infinity.clone())
    }

    pub fn nan(self: &Arc<Self>) -> RealScalar {
        RealScalar::from_raw(self, self.singletons.nan.clone())
    }

    /// Pi at the working precision.
    pub fn pi(self: &Arc<Self>) -> RealScalar {
        let (p, rounding) = (self.precision_bits(), self.rounding());
        let raw = self.with_consts(|cc| backend::pi(p, rounding, cc));
        RealScalar::from_raw(self, raw)
    }

    /// Euler's number at the working precision.
    pub fn e(self: &Arc<Self>) -> RealScalar {
        let (p, rounding) = (self.precision_bits(), self.rounding());
        let raw = self.with_consts(|cc| backend::e(p, rounding, cc));
        RealScalar::from_raw(self, raw)
    }
}

impl fmt::Debug for PrecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrecisionContext")
            .field("id", &self.id)
            .field("precision_bits", &self.precision_bits())
            .field("rounding", &self.rounding())
            .field("tolerance", self.tolerance())
            .field("max_denominator", &self.max_denominator)
            .finish()
    }
}

// ============================================================================
// Tolerance Derivation
// ============================================================================

/// `100 * 2^(1 - bits)`, exact.
fn default_tolerance(precision_bits: usize, rounding: Rounding) -> BigFloat {
    let eps = BigRational::new(BigInt::one(), BigInt::one() << (precision_bits - 1));
    let tolerance = BigRational::from_integer(BigInt::from(100)) * eps;
    backend::from_rational(&tolerance, precision_bits, rounding)
}

fn convert_tolerance(
    setting: &ToleranceSetting,
    precision_bits: usize,
    rounding: Rounding,
    consts: &mut Consts,
) -> DomainResult<BigFloat> {
    match setting {
        ToleranceSetting::Integer(value) => Ok(backend::from_integer(*value, precision_bits)),
        ToleranceSetting::Float(value) => Ok(backend::from_float(*value, precision_bits)),
        ToleranceSetting::Text(text) => backend::from_string(text, precision_bits, rounding, consts)
            .ok_or_else(|| {
                DomainError::conversion(format!("expected a real number, got {:?}", text))
            }),
    }
}

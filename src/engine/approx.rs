// ============================================================================
// Approximate Equality
// Relative/absolute epsilon comparison with context defaults
// ============================================================================

use crate::domain::{PrecisionContext, Value};
use crate::numeric::DomainResult;
use crate::scalar::{RealScalar, Scalar};
use std::sync::Arc;

impl PrecisionContext {
    /// Whether `s` and `t` agree within `rel_eps` or `abs_eps`.
    ///
    /// `t` is converted through [`convert`](Self::convert) first. Omitted
    /// epsilons default to the context tolerance; if only one is given it is
    /// used for both. The difference is tested against `abs_eps` first and
    /// only then divided by the larger magnitude and tested against
    /// `rel_eps`. NaN is never almost equal to anything.
    ///
    /// Operands that compare exactly equal are almost equal without
    /// evaluating the difference. This is the rule that makes equal
    /// infinities almost equal, since `inf - inf` is NaN.
    ///
    /// # Errors
    /// `Conversion` if `t` cannot be converted.
    pub fn almost_equal(
        self: &Arc<Self>,
        s: &Scalar,
        t: impl Into<Value>,
        rel_eps: Option<&RealScalar>,
        abs_eps: Option<&RealScalar>,
    ) -> DomainResult<bool> {
        let t = self.convert(t)?;

        let (rel_eps, abs_eps) = match (rel_eps, abs_eps) {
            (None, None) => {
                let tol = self.tolerance_scalar();
                (tol.clone(), tol)
            },
            (Some(rel), None) => (rel.clone(), rel.clone()),
            (None, Some(abs)) => (abs.clone(), abs.clone()),
            (Some(rel), Some(abs)) => (rel.clone(), abs.clone()),
        };

        // exact equality; covers equal infinities
        if *s == t {
            return Ok(true);
        }

        let diff = (s - &t).abs();
        if diff <= abs_eps {
            return Ok(true);
        }

        let (abs_s, abs_t) = (s.abs(), t.abs());
        let err = &diff / abs_s.max(&abs_t);
        Ok(err <= rel_eps)
    }

    /// [`almost_equal`](Self::almost_equal) with the default tolerances.
    pub fn almost_eq(self: &Arc<Self>, s: &Scalar, t: impl Into<Value>) -> DomainResult<bool> {
        self.almost_equal(s, t, None, None)
    }
}

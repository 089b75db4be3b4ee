// ============================================================================
// Rational Reconstruction
// Best rational approximation with a bounded denominator
// ============================================================================

use crate::domain::PrecisionContext;
use crate::numeric::backend;
use crate::numeric::{DomainError, DomainResult};
use crate::scalar::RealScalar;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

impl PrecisionContext {
    /// Rational value of a real scalar.
    ///
    /// The stored float is converted exactly. With `limit` set and a
    /// denominator above [`max_denominator`](Self::max_denominator), the
    /// closest fraction whose denominator fits the bound is returned instead.
    ///
    /// # Errors
    /// `Conversion` for NaN and infinities.
    pub fn to_rational(&self, scalar: &RealScalar, limit: bool) -> DomainResult<BigRational> {
        let exact = backend::exact_rational_of(scalar.bits()).ok_or_else(|| {
            DomainError::conversion(format!("cannot convert {} to a rational", scalar))
        })?;

        match (limit, self.max_denominator()) {
            (true, Some(max_denominator)) => {
                let limited = limit_denominator(&exact, max_denominator);
                tracing::trace!(%exact, %limited, "reconstructed rational");
                Ok(limited)
            },
            _ => Ok(exact),
        }
    }
}

/// Closest fraction to `value` with denominator at most `max_denominator`.
///
/// Walks the continued-fraction convergents of `value` until the next one
/// would exceed the bound, then picks between the last convergent and the
/// largest semiconvergent that still fits. Ties go to the convergent. If the
/// bound admits no candidate the value is returned unchanged.
pub fn limit_denominator(value: &BigRational, max_denominator: &BigInt) -> BigRational {
    if value.denom() <= max_denominator {
        return value.clone();
    }

    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let (mut n, mut d) = (value.numer().clone(), value.denom().clone());

    while !d.is_zero() {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denominator {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    if q1.is_zero() {
        return value.clone();
    }

    let k = (max_denominator - &q0).div_floor(&q1);
    let q_semi = &q0 + &k * &q1;
    if q_semi.is_zero() {
        return value.clone();
    }

    let semiconvergent = BigRational::new(&p0 + &k * &p1, q_semi);
    let convergent = BigRational::new(p1, q1);

    if (&convergent - value).abs() <= (&semiconvergent - value).abs() {
        convergent
    } else {
        semiconvergent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContextConfig;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn bound(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_within_bound_unchanged() {
        assert_eq!(limit_denominator(&ratio(3, 7), &bound(7)), ratio(3, 7));
        assert_eq!(limit_denominator(&ratio(-5, 1), &bound(1)), ratio(-5, 1));
    }

    #[test]
    fn test_pi_approximations() {
        // 3.14159265358979 as an exact decimal fraction
        let pi = ratio(314_159_265_358_979, 100_000_000_000_000);
        assert_eq!(limit_denominator(&pi, &bound(10)), ratio(22, 7));
        assert_eq!(limit_denominator(&pi, &bound(100)), ratio(311, 99));
        assert_eq!(limit_denominator(&pi, &bound(1000)), ratio(355, 113));
    }

    #[test]
    fn test_semiconvergent_wins() {
        // convergents of 0.84 are 0, 1, 5/6, 21/25; with bound 10 the
        // candidates are 5/6 and the semiconvergent 6/7
        assert_eq!(limit_denominator(&ratio(21, 25), &bound(10)), ratio(5, 6));
        // 0.1428 is closer to 1/7 than to anything else under 10
        assert_eq!(limit_denominator(&ratio(1428, 10000), &bound(10)), ratio(1, 7));
        // 0.58 -> 4/7 (0.5714) beats 3/5 (0.6)
        assert_eq!(limit_denominator(&ratio(58, 100), &bound(7)), ratio(4, 7));
    }

    #[test]
    fn test_negative_values() {
        let pi = ratio(-314_159_265_358_979, 100_000_000_000_000);
        assert_eq!(limit_denominator(&pi, &bound(1000)), ratio(-355, 113));
    }

    #[test]
    fn test_tie_prefers_convergent() {
        // 1/4 sits exactly between 0/1 and 1/2 with bound 3: the last
        // convergent 0/1 and the semiconvergent 1/3 are 1/4 and 1/12 away,
        // so 1/3 wins; with bound 2 the candidates are 0/1 and 1/2, both
        // 1/4 away, and the convergent 0/1 is kept
        assert_eq!(limit_denominator(&ratio(1, 4), &bound(3)), ratio(1, 3));
        assert_eq!(limit_denominator(&ratio(1, 4), &bound(2)), ratio(0, 1));
    }

    #[test]
    fn test_degenerate_bound() {
        assert_eq!(limit_denominator(&ratio(1, 3), &bound(0)), ratio(1, 3));
    }

    #[test]
    fn test_context_to_rational() {
        let ctx = PrecisionContext::double().unwrap();
        let three = ctx.convert_real("3.0").unwrap();
        assert_eq!(ctx.to_rational(&three, true).unwrap(), ratio(3, 1));

        let third = ctx.convert_real(ratio(1, 3)).unwrap();
        assert_eq!(ctx.to_rational(&third, true).unwrap(), ratio(1, 3));
        let exact = ctx.to_rational(&third, false).unwrap();
        assert_ne!(exact, ratio(1, 3));
        assert!(exact.denom() > ctx.max_denominator().unwrap());
    }

    #[test]
    fn test_context_to_rational_specials() {
        let ctx = PrecisionContext::double().unwrap();
        assert!(ctx.to_rational(&ctx.nan(), true).unwrap_err().is_conversion());
        assert!(ctx
            .to_rational(&ctx.pos_infinity(), false)
            .unwrap_err()
            .is_conversion());
        assert_eq!(ctx.to_rational(&ctx.zero(), true).unwrap(), ratio(0, 1));
    }

    #[test]
    fn test_zero_tolerance_is_unbounded() {
        let ctx = PrecisionContext::new(ContextConfig::new().with_tolerance(0)).unwrap();
        let third = ctx.convert_real(ratio(1, 3)).unwrap();
        let r = ctx.to_rational(&third, true).unwrap();
        assert_eq!(r, ctx.to_rational(&third, false).unwrap());
        assert_ne!(r, ratio(1, 3));
    }

    #[test]
    fn test_coarse_tolerance() {
        let ctx = PrecisionContext::new(ContextConfig::new().with_tolerance("0.0078125")).unwrap();
        assert_eq!(ctx.max_denominator(), Some(&BigInt::from(128)));
        let pi = ctx.pi();
        let r = ctx.to_rational(&pi, true).unwrap();
        assert_eq!(r, ratio(355, 113));
    }
}

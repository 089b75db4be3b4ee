// ============================================================================
// Multiprecision Backend
// Thin adapter over the binary-float engine and exact rational arithmetic
// ============================================================================
//
// Everything the domain needs from the float engine funnels through here:
// construction from integers/floats/strings/rationals, rounded arithmetic,
// ordered comparison, and the exact rational value of a stored float.
//
// The engine sizes mantissas in whole words, so a 53-bit request still keeps
// 64 bits. Every producer here therefore rounds its result to exactly the
// requested number of significant bits (`round_to_bits`). Engine operations
// run with GUARD_BITS extra bits under round-to-odd, which makes the final
// round-to-nearest a correct single rounding.

use super::errors::{DomainError, DomainResult};
use astro_float::{
    BigFloat, Consts, Exponent, Radix, RoundingMode, Sign, Word, INF_NEG, INF_POS, NAN,
    WORD_BIT_SIZE,
};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extra precision for engine operations ahead of the final rounding.
const GUARD_BITS: usize = 2;

/// Decimal exponents beyond this are left to the engine's parser.
const MAX_EXACT_DECIMAL_EXPONENT: i64 = 4096;

// ============================================================================
// Rounding
// ============================================================================

/// Rounding applied to every engine operation of a context.
///
/// Only round-to-nearest is supported; directed modes belong to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Round to nearest, ties to even
    #[default]
    NearestEven,
}

impl Rounding {
    /// The engine rounding mode for this setting.
    #[inline]
    pub fn mode(self) -> RoundingMode {
        match self {
            Rounding::NearestEven => RoundingMode::ToEven,
        }
    }
}

// ============================================================================
// Precision Enforcement
// ============================================================================

/// Round `value` to exactly `bits` significant bits.
///
/// Zero, NaN and infinities are returned as they are, as is any value that
/// already fits.
pub fn round_to_bits(value: &BigFloat, bits: usize, rounding: Rounding) -> BigFloat {
    if value.is_zero() {
        return value.clone();
    }
    let Some((words, _, sign, exponent, _)) = value.as_raw_parts() else {
        return value.clone();
    };

    let mantissa = mantissa_of(words);
    let len = mantissa.bits() as usize;
    if len <= bits {
        return value.clone();
    }

    let dropped = len - bits;
    let mut kept = &mantissa >> dropped;
    let rest = &mantissa - (&kept << dropped);
    let half = BigUint::one() << (dropped - 1);
    let round_up = match rounding {
        Rounding::NearestEven => rest > half || (rest == half && kept.is_odd()),
    };
    if round_up {
        kept += 1u32;
    }

    let shift = exponent as i64 - (words.len() * WORD_BIT_SIZE) as i64 + dropped as i64;
    from_scaled(&kept, sign, shift)
}

fn mantissa_of(words: &[Word]) -> BigUint {
    words.iter().rev().fold(BigUint::zero(), |acc, word| {
        (acc << WORD_BIT_SIZE) + BigUint::from(*word)
    })
}

/// `magnitude * 2^shift` with the given sign, exactly.
fn from_scaled(magnitude: &BigUint, sign: Sign, shift: i64) -> BigFloat {
    if magnitude.is_zero() {
        return BigFloat::new(WORD_BIT_SIZE);
    }
    let len = (magnitude.bits() as usize).div_ceil(WORD_BIT_SIZE);
    let words = to_words(magnitude, len);
    let exponent = shift + (len * WORD_BIT_SIZE) as i64;
    match Exponent::try_from(exponent) {
        Ok(e) => BigFloat::from_words(&words, sign, e),
        Err(_) if exponent > 0 => match sign {
            Sign::Pos => INF_POS,
            Sign::Neg => INF_NEG,
        },
        Err(_) => BigFloat::new(WORD_BIT_SIZE),
    }
}

#[cfg(not(target_pointer_width = "32"))]
fn to_words(value: &BigUint, len: usize) -> Vec<Word> {
    let mut words = value.to_u64_digits();
    words.resize(len, 0);
    words
}

#[cfg(target_pointer_width = "32")]
fn to_words(value: &BigUint, len: usize) -> Vec<Word> {
    let mut words = value.to_u32_digits();
    words.resize(len, 0);
    words
}

// ============================================================================
// Construction
// ============================================================================

/// Fresh constant cache for parsing and named constants.
pub fn new_consts() -> DomainResult<Consts> {
    Consts::new().map_err(|e| DomainError::config(format!("engine constant cache: {:?}", e)))
}

/// Canonical exact zero.
#[inline]
pub fn zero(precision: usize) -> BigFloat {
    BigFloat::new(precision)
}

/// Canonical special values.
pub fn pos_infinity() -> BigFloat {
    INF_POS
}

pub fn neg_infinity() -> BigFloat {
    INF_NEG
}

pub fn nan() -> BigFloat {
    NAN
}

/// Convert a machine integer, rounding to `precision`.
pub fn from_integer(value: i64, precision: usize) -> BigFloat {
    // the engine only builds 64-bit integers at 64 bits or more
    let exact = BigFloat::from_i64(value, 64);
    round_to_bits(&exact, precision, Rounding::default())
}

/// Convert a big integer, rounding to `precision`.
pub fn from_big_integer(value: &BigInt, precision: usize, rounding: Rounding) -> BigFloat {
    round_to_bits(&exact_integer(value), precision, rounding)
}

/// Convert a machine float, rounding to `precision`. NaN and infinities map
/// to the engine's specials.
pub fn from_float(value: f64, precision: usize) -> BigFloat {
    if value.is_nan() {
        NAN
    } else if value.is_infinite() {
        if value > 0.0 {
            INF_POS
        } else {
            INF_NEG
        }
    } else {
        let exact = BigFloat::from_f64(value, 64);
        round_to_bits(&exact, precision, Rounding::default())
    }
}

/// Parse a decimal literal. Returns `None` when the text is not a number.
///
/// The whole trimmed text must be `[+-]digits[.digits][(e|E)[+-]digits]`
/// (either side of the point may be empty, not both), or one of the `inf`,
/// `infinity` and `nan` spellings.
pub fn from_string(
    text: &str,
    precision: usize,
    rounding: Rounding,
    consts: &mut Consts,
) -> Option<BigFloat> {
    let trimmed = text.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "nan" | "+nan" | "-nan" => Some(NAN),
        "inf" | "+inf" | "infinity" | "+infinity" => Some(INF_POS),
        "-inf" | "-infinity" => Some(INF_NEG),
        _ => DecimalLiteral::scan(trimmed)?.to_float(trimmed, precision, rounding, consts),
    }
}

/// Convert an exact rational with a single rounding to `precision`.
pub fn from_rational(value: &BigRational, precision: usize, rounding: Rounding) -> BigFloat {
    let numer = exact_integer(value.numer());
    if value.denom().is_one() {
        return round_to_bits(&numer, precision, rounding);
    }
    let denom = exact_integer(value.denom());
    div(&numer, &denom, precision, rounding)
}

fn exact_integer(value: &BigInt) -> BigFloat {
    let sign = if value.is_negative() { Sign::Neg } else { Sign::Pos };
    from_scaled(value.magnitude(), sign, 0)
}

// ============================================================================
// Decimal Literals
// ============================================================================

/// A validated decimal literal: `digits * 10^exponent`.
#[derive(Debug, PartialEq)]
struct DecimalLiteral {
    negative: bool,
    digits: BigUint,
    exponent: i64,
}

impl DecimalLiteral {
    fn scan(text: &str) -> Option<Self> {
        let (negative, body) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (number, exponent) = match body.find(|c| c == 'e' || c == 'E') {
            Some(at) => (&body[..at], Some(&body[at + 1..])),
            None => (body, None),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let explicit = match exponent {
            None => 0,
            Some(exp) => {
                let unsigned = exp.strip_prefix(|c| c == '+' || c == '-').unwrap_or(exp);
                if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                // out of i64 range: saturate, the engine handles the extremes
                exp.parse::<i64>().unwrap_or(if exp.starts_with('-') {
                    i64::MIN / 2
                } else {
                    i64::MAX / 2
                })
            },
        };

        let digits = format!("{}{}", whole, fraction);
        Some(Self {
            negative,
            digits: BigUint::parse_bytes(digits.as_bytes(), 10)?,
            exponent: explicit.saturating_sub(fraction.len() as i64),
        })
    }

    fn to_float(
        &self,
        text: &str,
        precision: usize,
        rounding: Rounding,
        consts: &mut Consts,
    ) -> Option<BigFloat> {
        if self.digits.is_zero() {
            return Some(zero(precision));
        }

        if self.exponent.abs() > MAX_EXACT_DECIMAL_EXPONENT {
            let unsigned = text.strip_prefix('+').unwrap_or(text);
            let raw = BigFloat::parse(
                unsigned,
                Radix::Dec,
                precision + GUARD_BITS,
                RoundingMode::ToOdd,
                consts,
            );
            return (!raw.is_nan()).then(|| round_to_bits(&raw, precision, rounding));
        }

        let magnitude = BigInt::from(self.digits.clone());
        let scale = BigInt::from(10u32).pow(self.exponent.unsigned_abs() as u32);
        let mut value = if self.exponent >= 0 {
            BigRational::from_integer(magnitude * scale)
        } else {
            BigRational::new(magnitude, scale)
        };
        if self.negative {
            value = -value;
        }
        Some(from_rational(&value, precision, rounding))
    }
}

// ============================================================================
// Rounded Arithmetic
// ============================================================================

macro_rules! rounded_binop {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(a: &BigFloat, b: &BigFloat, precision: usize, rounding: Rounding) -> BigFloat {
                let wide = BigFloat::$name(a, b, precision + GUARD_BITS, RoundingMode::ToOdd);
                round_to_bits(&wide, precision, rounding)
            }
        )*
    };
}

rounded_binop! {
    /// `a + b` correctly rounded to `precision` bits.
    add,
    /// `a - b` correctly rounded to `precision` bits.
    sub,
    /// `a * b` correctly rounded to `precision` bits.
    mul,
    /// `a / b` correctly rounded to `precision` bits.
    div,
}

/// Square root correctly rounded to `precision` bits.
pub fn sqrt(value: &BigFloat, precision: usize, rounding: Rounding) -> BigFloat {
    let wide = BigFloat::sqrt(value, precision + GUARD_BITS, RoundingMode::ToOdd);
    round_to_bits(&wide, precision, rounding)
}

/// Pi at `precision` bits.
pub fn pi(precision: usize, rounding: Rounding, consts: &mut Consts) -> BigFloat {
    let wide = consts.pi(precision + GUARD_BITS, RoundingMode::ToOdd);
    round_to_bits(&wide, precision, rounding)
}

/// Euler's number at `precision` bits.
pub fn e(precision: usize, rounding: Rounding, consts: &mut Consts) -> BigFloat {
    let wide = consts.e(precision + GUARD_BITS, RoundingMode::ToOdd);
    round_to_bits(&wide, precision, rounding)
}

// ============================================================================
// Magnitude and Comparison
// ============================================================================

/// `|value|` rounded to `precision`.
pub fn rounded_abs(value: &BigFloat, precision: usize, rounding: Rounding) -> BigFloat {
    round_to_bits(&BigFloat::abs(value), precision, rounding)
}

/// Ordered comparison; `None` when either side is NaN.
#[inline]
pub fn compare(a: &BigFloat, b: &BigFloat) -> Option<Ordering> {
    BigFloat::cmp(a, b).map(|c| c.cmp(&0))
}

#[inline]
pub fn less_than(a: &BigFloat, b: &BigFloat) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

#[inline]
pub fn less_or_equal(a: &BigFloat, b: &BigFloat) -> bool {
    matches!(compare(a, b), Some(Ordering::Less | Ordering::Equal))
}

// ============================================================================
// Exact Rational Value
// ============================================================================

/// The exact rational value of a finite binary float, in lowest terms.
///
/// The engine stores a mantissa `m` of `w` words and an exponent `e`,
/// meaning `m * 2^(e - w * WORD_BIT_SIZE)`. Returns `None` for NaN and
/// infinities.
pub fn exact_rational_of(value: &BigFloat) -> Option<BigRational> {
    if value.is_nan() || value.is_inf() {
        return None;
    }
    if value.is_zero() {
        return Some(BigRational::zero());
    }

    let (words, _, sign, exponent, _) = value.as_raw_parts()?;

    let mut numer = BigInt::from(mantissa_of(words));
    if matches!(sign, Sign::Neg) {
        numer = -numer;
    }

    let shift = exponent as i64 - (words.len() * WORD_BIT_SIZE) as i64;
    if shift >= 0 {
        Some(BigRational::from_integer(numer << shift as usize))
    } else {
        Some(BigRational::new(numer, BigInt::one() << (-shift) as usize))
    }
}

/// `floor(1 / value)` with the reciprocal rounded at `precision`.
///
/// `None` for a zero value (unbounded). An infinite value yields zero.
pub fn floor_reciprocal(value: &BigFloat, precision: usize, rounding: Rounding) -> Option<BigInt> {
    if value.is_zero() {
        return None;
    }
    let reciprocal = div(&from_integer(1, precision), value, precision, rounding);
    exact_rational_of(&reciprocal).map(|r| r.floor().to_integer())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn parse(text: &str, precision: usize) -> Option<BigFloat> {
        let mut cc = new_consts().unwrap();
        from_string(text, precision, Rounding::NearestEven, &mut cc)
    }

    /// Bits between the lowest and highest set bit of the mantissa, inclusive.
    fn significant_bits(value: &BigFloat) -> u64 {
        let r = exact_rational_of(value).unwrap();
        let numer = r.numer().magnitude().clone();
        numer.bits() - numer.trailing_zeros().unwrap_or(0)
    }

    #[test]
    fn test_rounding_mode() {
        assert_eq!(Rounding::NearestEven.mode(), RoundingMode::ToEven);
        assert_eq!(Rounding::default(), Rounding::NearestEven);
    }

    #[test]
    fn test_integers_below_word_precision() {
        for bits in [1, 10, 32, 53, 63, 64, 65, 113] {
            let one = from_integer(1, bits);
            assert!(!one.is_nan(), "1 is NaN at {} bits", bits);
            assert_eq!(exact_rational_of(&one), Some(ratio(1, 1)));

            let minus = from_integer(-12, bits.max(4));
            assert_eq!(exact_rational_of(&minus), Some(ratio(-12, 1)));
        }
        assert_eq!(exact_rational_of(&zero(53)), Some(ratio(0, 1)));
    }

    #[test]
    fn test_integer_rounding() {
        // 3 = 0b11 has no 1-bit representation; the tie goes to even (4)
        assert_eq!(exact_rational_of(&from_integer(3, 1)), Some(ratio(4, 1)));
        // 2^53 + 1 is the first integer a 53-bit float cannot hold
        let big = (1i64 << 53) + 1;
        assert_eq!(
            exact_rational_of(&from_integer(big, 53)),
            Some(ratio(1i64 << 53, 1))
        );
        assert_eq!(
            exact_rational_of(&from_big_integer(&BigInt::from(big), 64, Rounding::NearestEven)),
            Some(ratio(big, 1))
        );
    }

    #[test]
    fn test_round_to_bits() {
        let third = from_rational(&ratio(1, 3), 200, Rounding::NearestEven);
        for bits in [1, 7, 24, 53, 64, 100] {
            let rounded = round_to_bits(&third, bits, Rounding::NearestEven);
            assert!(significant_bits(&rounded) <= bits as u64);
        }
        assert!(round_to_bits(&nan(), 10, Rounding::NearestEven).is_nan());
        assert!(round_to_bits(&pos_infinity(), 10, Rounding::NearestEven).is_inf_pos());
        assert!(round_to_bits(&zero(64), 10, Rounding::NearestEven).is_zero());
    }

    #[test]
    fn test_round_to_bits_carry() {
        // 0b1111 at 3 bits rounds up to 0b10000
        let fifteen = from_integer(15, 64);
        assert_eq!(
            exact_rational_of(&round_to_bits(&fifteen, 3, Rounding::NearestEven)),
            Some(ratio(16, 1))
        );
    }

    #[test]
    fn test_float_matches_machine_double() {
        let tenth = from_float(0.1, 53);
        assert_eq!(
            exact_rational_of(&tenth).unwrap().denom(),
            &(BigInt::one() << 55usize)
        );
        assert_eq!(exact_rational_of(&from_float(0.75, 53)), Some(ratio(3, 4)));
        assert_eq!(exact_rational_of(&from_float(-2.5, 53)), Some(ratio(-5, 2)));
    }

    #[test]
    fn test_exact_rational_of_specials() {
        assert_eq!(exact_rational_of(&nan()), None);
        assert_eq!(exact_rational_of(&pos_infinity()), None);
        assert_eq!(exact_rational_of(&neg_infinity()), None);
    }

    #[test]
    fn test_from_string() {
        assert_eq!(exact_rational_of(&parse("3.0", 53).unwrap()), Some(ratio(3, 1)));
        assert_eq!(exact_rational_of(&parse(" -2.5e1 ", 53).unwrap()), Some(ratio(-25, 1)));
        assert_eq!(exact_rational_of(&parse("+.5", 53).unwrap()), Some(ratio(1, 2)));
        assert_eq!(exact_rational_of(&parse("4.", 53).unwrap()), Some(ratio(4, 1)));
        assert_eq!(exact_rational_of(&parse("125E-3", 53).unwrap()), Some(ratio(1, 8)));
        assert!(parse("0e999999999999999999999", 53).unwrap().is_zero());

        // same value as the machine double nearest to 0.1
        let text = parse("0.1", 53).unwrap();
        assert_eq!(compare(&text, &from_float(0.1, 53)), Some(Ordering::Equal));

        assert!(parse("inf", 53).unwrap().is_inf_pos());
        assert!(parse("-Infinity", 53).unwrap().is_inf_neg());
        assert!(parse("nan", 53).unwrap().is_nan());
    }

    #[test]
    fn test_from_string_rejects_partial_literals() {
        for text in [
            "", ".", "-", "e5", "not_a_number", "3.0abc", "1.2.3", "0x10", "1_000", "1e",
            "1e+", "--1", "+-1", "1 2", "1e5.0", "inf5",
        ] {
            assert!(parse(text, 53).is_none(), "{:?} should not parse", text);
        }
    }

    #[test]
    fn test_from_rational_correctly_rounded() {
        let value = from_rational(&ratio(-7, 8), 53, Rounding::NearestEven);
        assert_eq!(exact_rational_of(&value), Some(ratio(-7, 8)));

        let third = from_rational(&ratio(1, 3), 53, Rounding::NearestEven);
        assert_eq!(compare(&third, &from_float(1.0 / 3.0, 53)), Some(Ordering::Equal));
    }

    #[test]
    fn test_rounded_arithmetic() {
        let tenth = from_float(0.1, 53);
        let three = from_integer(3, 53);
        let product = mul(&tenth, &three, 53, Rounding::NearestEven);
        // same as IEEE double: 0.1 * 3 == 0.30000000000000004
        assert_eq!(compare(&product, &from_float(0.1 * 3.0, 53)), Some(Ordering::Equal));

        let sum = add(&tenth, &from_float(0.2, 53), 53, Rounding::NearestEven);
        assert_eq!(compare(&sum, &from_float(0.1 + 0.2, 53)), Some(Ordering::Equal));

        let root = sqrt(&from_integer(2, 53), 53, Rounding::NearestEven);
        assert_eq!(compare(&root, &from_float(2f64.sqrt(), 53)), Some(Ordering::Equal));
    }

    #[test]
    fn test_comparison() {
        let one = from_integer(1, 53);
        let two = from_integer(2, 53);
        assert!(less_than(&one, &two));
        assert!(!less_than(&two, &one));
        assert!(less_or_equal(&one, &one));
        assert_eq!(compare(&nan(), &one), None);
        assert!(!less_than(&nan(), &one));
    }

    #[test]
    fn test_floor_reciprocal() {
        let quarter = from_float(0.25, 53);
        assert_eq!(
            floor_reciprocal(&quarter, 53, Rounding::NearestEven),
            Some(BigInt::from(4))
        );
        let three = from_integer(3, 53);
        assert_eq!(
            floor_reciprocal(&three, 53, Rounding::NearestEven),
            Some(BigInt::zero())
        );
        assert_eq!(floor_reciprocal(&zero(53), 53, Rounding::NearestEven), None);
        assert_eq!(
            floor_reciprocal(&pos_infinity(), 53, Rounding::NearestEven),
            Some(BigInt::zero())
        );
    }

    #[test]
    fn test_rounded_abs() {
        let value = from_integer(-5, 53);
        let magnitude = rounded_abs(&value, 53, Rounding::NearestEven);
        assert_eq!(compare(&magnitude, &from_integer(5, 53)), Some(Ordering::Equal));
    }
}

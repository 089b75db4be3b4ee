// ============================================================================
// Precision Domain Library
// Multiprecision real and complex scalars for a symbolic numeric domain
// ============================================================================

//! # Precision Domain
//!
//! Arbitrary-precision real and complex scalars that keep numerical noise
//! out of exact algorithms.
//!
//! ## Features
//!
//! - **Precision contexts** owning working precision, rounding and tolerance
//! - **Snapping write barrier**: every scalar write zeroes magnitudes below
//!   the tolerance, component-wise for complex values
//! - **Rational reconstruction** with a denominator bound derived from the
//!   tolerance (continued-fraction convergents)
//! - **Approximate equality** with relative and absolute epsilons
//!
//! ## Example
//!
//! ```rust
//! use precision_domain::prelude::*;
//!
//! let ctx = PrecisionContext::new(ContextConfig::double()).unwrap();
//!
//! // Noise below the tolerance becomes exact zero
//! assert!(ctx.convert("1e-20").unwrap().is_zero());
//!
//! // Recover a small fraction from its rounded float
//! let third = ctx.convert_real(1).unwrap() / ctx.convert_real(3).unwrap();
//! let r = ctx.to_rational(&third, true).unwrap();
//! assert_eq!(r.to_string(), "1/3");
//!
//! // Compare under the context tolerance
//! let one = ctx.convert("1.0").unwrap();
//! assert!(ctx.almost_eq(&one, "1.00000000000001").unwrap());
//! assert!(!ctx.almost_eq(&one, "1.001").unwrap());
//! ```

pub mod domain;
pub mod engine;
pub mod numeric;
pub mod scalar;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ContextConfig, ContextId, PrecisionContext, ToleranceSetting, Value,
        DEFAULT_PRECISION_BITS,
    };
    pub use crate::engine::limit_denominator;
    pub use crate::numeric::{BigFloat, DomainError, DomainResult, Rounding};
    pub use crate::scalar::{Barrier, ComplexScalar, RealScalar, Scalar};
}

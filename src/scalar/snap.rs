// ============================================================================
// Snapping Write Barrier
// Zeroes sub-tolerance magnitudes on every scalar write
// ============================================================================

use crate::numeric::backend;
use crate::numeric::{BigFloat, Rounding};

/// Parameters of the write barrier, owned by a precision context.
#[derive(Debug, Clone)]
pub struct Barrier {
    precision_bits: usize,
    rounding: Rounding,
    tolerance: BigFloat,
}

impl Barrier {
    pub(crate) fn new(precision_bits: usize, rounding: Rounding, tolerance: BigFloat) -> Self {
        Self {
            precision_bits,
            rounding,
            tolerance,
        }
    }

    #[inline]
    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    #[inline]
    pub fn tolerance(&self) -> &BigFloat {
        &self.tolerance
    }

    /// Apply the barrier to a raw value.
    ///
    /// The magnitude is rounded to the working precision and compared
    /// strictly against the tolerance; below it the value becomes exact zero,
    /// otherwise it is kept. Kept values never carry more than the working
    /// precision: backend producers already round to it, anything wider
    /// (such as a value from another context) is rounded here. NaN and
    /// infinities pass unchanged.
    pub fn snap(&self, raw: BigFloat) -> BigFloat {
        let magnitude = backend::rounded_abs(&raw, self.precision_bits, self.rounding);
        if backend::less_than(&magnitude, &self.tolerance) {
            if !raw.is_zero() {
                tracing::trace!(value = ?raw, "snapping sub-tolerance value to zero");
            }
            backend::zero(self.precision_bits)
        } else {
            backend::round_to_bits(&raw, self.precision_bits, self.rounding)
        }
    }
}

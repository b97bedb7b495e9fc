//! Scalar-type seam for the simplification engine.
//!
//! The engine is generic over the scalar representation of the field it
//! rewrites. [`ScalarLike`] names the exact capabilities the passes need:
//! a total order (NaN-free comparison for heaps and sorts), NaN detection
//! for input scrubbing, and the additive epsilon used by the perturbation
//! pass. Only `f32` and `f64` implement it.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Add;

/// Integer tie-breaker paired with every scalar value.
///
/// Offsets induce a strict total order on vertices with equal scalar
/// values (symbolic perturbation). Signed and wide enough to hold
/// `vertex_count + 2` for any realistic mesh.
pub type Offset = i64;

/// Capabilities a scalar field value must provide to be simplified.
///
/// Implemented for `f32` and `f64`. The perturbation epsilon is
/// `10^(1 - DIGITS)` where `DIGITS` is the decimal precision of the type,
/// so consecutive lifted values stay distinguishable after rounding.
pub trait ScalarLike:
    Copy + PartialOrd + Add<Output = Self> + Send + Sync + Debug + 'static
{
    /// Total order over all values, including NaN and signed zero.
    fn total_cmp(self, other: Self) -> Ordering;

    /// Whether the value is a NaN payload (scrubbed to zero at entry).
    fn is_nan(self) -> bool;

    /// The replacement value for scrubbed NaNs.
    fn zero() -> Self;

    /// Additive step for the perturbation pass, `None` when the type has
    /// no meaningful epsilon (the pass then fails rather than guessing).
    fn perturbation_epsilon() -> Option<Self>;
}

impl ScalarLike for f32 {
    #[inline]
    fn total_cmp(self, other: Self) -> Ordering {
        f32::total_cmp(&self, &other)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn perturbation_epsilon() -> Option<Self> {
        // FLT_DIG == 6
        Some(1e-5)
    }
}

impl ScalarLike for f64 {
    #[inline]
    fn total_cmp(self, other: Self) -> Ordering {
        f64::total_cmp(&self, &other)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn perturbation_epsilon() -> Option<Self> {
        // DBL_DIG == 15
        Some(1e-14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cmp_orders_nan_last() {
        assert_eq!(1.0f64.total_cmp(2.0), Ordering::Less);
        assert_eq!(f64::NAN.total_cmp(f64::INFINITY), Ordering::Greater);
    }

    #[test]
    fn nan_detection() {
        assert!(f32::NAN.is_nan());
        assert!(!1.5f32.is_nan());
        assert_eq!(f32::zero(), 0.0);
    }

    #[test]
    fn epsilon_matches_decimal_precision() {
        assert_eq!(f32::perturbation_epsilon(), Some(1e-5));
        assert_eq!(f64::perturbation_epsilon(), Some(1e-14));
    }

    #[test]
    fn epsilon_survives_addition_to_unit_values() {
        let eps = f64::perturbation_epsilon().unwrap();
        assert!(1.0 + eps > 1.0);
        let eps = f32::perturbation_epsilon().unwrap();
        assert!(1.0f32 + eps > 1.0f32);
    }
}

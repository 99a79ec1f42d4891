//! Dimension vectors
//!
//! A [`Dimension`] is the list of exponents expressing a quantity as a product of
//! powers of the base quantities of its system. Index `i` corresponds to base
//! quantity `i`. Exponents are `f64` so that root quantities (fractional powers)
//! stay representable.
//!
//! # Rounding policy
//! Exponents produced by arithmetic or conversion are snapped to the nearest
//! rational `p/q` with `q <= 12` when they lie within [`EXPONENT_TOLERANCE`] of it.
//! Integer and simple fractional exponents therefore stay bit-exact through
//! transfer-matrix round trips, which keeps exact equality usable everywhere.
//!
//! # Usage
//! ```
//! use units_core::Dimension;
//!
//! let length = Dimension::one_hot(3, 0);
//! let time = Dimension::one_hot(3, 1);
//! let velocity = &length - &time;
//! assert_eq!(velocity.exponents(), &[1.0, -1.0, 0.0]);
//! assert_eq!((&velocity * 2.0).exponents(), &[2.0, -2.0, 0.0]);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use crate::error::{Result, UnitsError};

/// Maximum distance at which an exponent is snapped onto a simple rational
pub const EXPONENT_TOLERANCE: f64 = 1e-9;

/// Largest denominator considered when snapping exponents
const MAX_DENOMINATOR: i64 = 12;

/// Snap an exponent onto the nearest `p/q` (`q <= 12`) within tolerance.
#[inline]
fn snap_exponent(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    for q in 1..=MAX_DENOMINATOR {
        let q = q as f64;
        let candidate = (x * q).round() / q;
        if (x - candidate).abs() <= EXPONENT_TOLERANCE {
            // `+ 0.0` folds -0.0 into 0.0
            return candidate + 0.0;
        }
    }
    x
}

/// Ordered exponents of a quantity over the base quantities of its system
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Dimension(Vec<f64>);

impl Dimension {
    /// Create a dimension from raw exponents, applying the rounding policy.
    #[must_use]
    pub fn new(exponents: impl Into<Vec<f64>>) -> Self {
        let mut exponents = exponents.into();
        for e in &mut exponents {
            *e = snap_exponent(*e);
        }
        Dimension(exponents)
    }

    /// The dimensionless vector of length `n`
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Dimension(vec![0.0; n])
    }

    /// Vector of length `n` with exponent 1 at `index` and 0 elsewhere.
    ///
    /// # Panics
    /// Panics if `index >= n`.
    #[must_use]
    #[track_caller]
    pub fn one_hot(n: usize, index: usize) -> Self {
        assert!(index < n, "Dimension::one_hot: index {index} out of range for length {n}");
        let mut exponents = vec![0.0; n];
        exponents[index] = 1.0;
        Dimension(exponents)
    }

    /// Number of exponents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the vector has no exponents at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw exponents
    #[inline]
    #[must_use]
    pub fn exponents(&self) -> &[f64] {
        &self.0
    }

    /// True when no exponent is NaN or infinite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|e| e.is_finite())
    }

    /// True when every exponent is zero
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e == 0.0)
    }

    /// Element-wise sum, failing on unequal lengths.
    ///
    /// # Errors
    /// [`UnitsError::DimensionArityMismatch`] if the lengths differ.
    pub fn checked_add(&self, other: &Dimension) -> Result<Dimension> {
        self.check_same_len(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Element-wise difference, failing on unequal lengths.
    ///
    /// # Errors
    /// [`UnitsError::DimensionArityMismatch`] if the lengths differ.
    pub fn checked_sub(&self, other: &Dimension) -> Result<Dimension> {
        self.check_same_len(other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Multiply every exponent by `k` (fractional `k` gives root quantities).
    #[must_use]
    pub fn scale(&self, k: f64) -> Dimension {
        Dimension::new(self.0.iter().map(|e| e * k).collect::<Vec<_>>())
    }

    fn check_same_len(&self, other: &Dimension) -> Result<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(UnitsError::DimensionArityMismatch {
                system: "<dimension>".to_string(),
                expected: self.len(),
                actual: other.len(),
            })
        }
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(f64, f64) -> f64) -> Dimension {
        Dimension::new(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| f(*a, *b))
                .collect::<Vec<_>>(),
        )
    }
}

impl From<Vec<f64>> for Dimension {
    fn from(exponents: Vec<f64>) -> Self {
        Dimension::new(exponents)
    }
}

impl From<Dimension> for Vec<f64> {
    fn from(dimension: Dimension) -> Self {
        dimension.0
    }
}

impl<const N: usize> From<[f64; N]> for Dimension {
    fn from(exponents: [f64; N]) -> Self {
        Dimension::new(exponents.to_vec())
    }
}

impl Index<usize> for Dimension {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

// ============================================================================
// OPERATORS (lengths must match; quantities check arity before using these)
// ============================================================================

impl Add<&Dimension> for &Dimension {
    type Output = Dimension;
    #[track_caller]
    fn add(self, rhs: &Dimension) -> Dimension {
        assert_eq!(self.len(), rhs.len(), "Dimension + Dimension: length mismatch");
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add for Dimension {
    type Output = Dimension;
    #[track_caller]
    fn add(self, rhs: Dimension) -> Dimension {
        &self + &rhs
    }
}

impl Sub<&Dimension> for &Dimension {
    type Output = Dimension;
    #[track_caller]
    fn sub(self, rhs: &Dimension) -> Dimension {
        assert_eq!(self.len(), rhs.len(), "Dimension - Dimension: length mismatch");
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub for Dimension {
    type Output = Dimension;
    #[track_caller]
    fn sub(self, rhs: Dimension) -> Dimension {
        &self - &rhs
    }
}

impl Neg for &Dimension {
    type Output = Dimension;
    fn neg(self) -> Dimension {
        Dimension::new(self.0.iter().map(|e| -e).collect::<Vec<_>>())
    }
}

impl Neg for Dimension {
    type Output = Dimension;
    fn neg(self) -> Dimension {
        -&self
    }
}

impl Mul<f64> for &Dimension {
    type Output = Dimension;
    fn mul(self, rhs: f64) -> Dimension {
        self.scale(rhs)
    }
}

impl Mul<f64> for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: f64) -> Dimension {
        self.scale(rhs)
    }
}

impl Mul<&Dimension> for f64 {
    type Output = Dimension;
    fn mul(self, rhs: &Dimension) -> Dimension {
        rhs.scale(self)
    }
}

impl Div<f64> for &Dimension {
    type Output = Dimension;
    fn div(self, rhs: f64) -> Dimension {
        Dimension::new(self.0.iter().map(|e| e / rhs).collect::<Vec<_>>())
    }
}

impl Div<f64> for Dimension {
    type Output = Dimension;
    fn div(self, rhs: f64) -> Dimension {
        &self / rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_arithmetic() {
        let a = Dimension::from([1.0, -2.0, 1.0]);
        let b = Dimension::from([0.0, 1.0, 2.0]);

        assert_eq!((&a + &b).exponents(), &[1.0, -1.0, 3.0]);
        assert_eq!((&a - &b).exponents(), &[1.0, -3.0, -1.0]);
        assert_eq!((-&a).exponents(), &[-1.0, 2.0, -1.0]);
        assert_eq!((2.0 * &a).exponents(), &[2.0, -4.0, 2.0]);
        assert_eq!((&a / 2.0).exponents(), &[0.5, -1.0, 0.5]);
    }

    #[test]
    fn test_fractional_exponents_are_exact() {
        let third = Dimension::from([1.0, 0.0]).scale(1.0 / 3.0);
        let sum = &(&third + &third) + &third;
        assert_eq!(sum, Dimension::from([1.0, 0.0]));
        assert_eq!(third[0], 1.0 / 3.0);
    }

    #[test]
    fn test_snapping_absorbs_float_noise() {
        let noisy = Dimension::new(vec![1.9999999999997, -1e-14, 0.50000000001]);
        assert_eq!(noisy.exponents(), &[2.0, 0.0, 0.5]);
        assert!(noisy[1].is_sign_positive());

        // Far from any simple fraction: kept as is
        let irrational = Dimension::new(vec![std::f64::consts::PI]);
        assert_eq!(irrational[0], std::f64::consts::PI);
    }

    #[test]
    fn test_is_finite() {
        assert!(Dimension::from([1.0, -0.5]).is_finite());
        assert!(!Dimension::new(vec![f64::NAN, 0.0]).is_finite());
        assert!(!Dimension::from([1.0, 0.0]).scale(f64::INFINITY).is_finite());
    }

    #[test]
    fn test_one_hot_and_zeros() {
        assert_eq!(Dimension::one_hot(3, 2).exponents(), &[0.0, 0.0, 1.0]);
        assert!(Dimension::zeros(4).is_dimensionless());
        assert!(!Dimension::one_hot(4, 0).is_dimensionless());
    }

    #[test]
    fn test_checked_ops_reject_length_mismatch() {
        let a = Dimension::zeros(3);
        let b = Dimension::zeros(2);
        assert!(matches!(
            a.checked_add(&b),
            Err(UnitsError::DimensionArityMismatch { expected: 3, actual: 2, .. })
        ));
        assert!(a.checked_sub(&b).is_err());
        assert_eq!(a.checked_add(&Dimension::one_hot(3, 1)), Ok(Dimension::one_hot(3, 1)));
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_operator_panics_on_length_mismatch() {
        let _ = &Dimension::zeros(3) + &Dimension::zeros(2);
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let d = Dimension::from([2.0, -1.0, 1.0]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "[2.0,-1.0,1.0]");
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_deserialize_applies_rounding_policy() {
        let parsed: Dimension =
            serde_json::from_str("[1.0000000001, -1e-12, 0.33333333333]").unwrap();
        assert_eq!(parsed, Dimension::from([1.0, 0.0, 1.0 / 3.0]));
        assert!(parsed[1].is_sign_positive());
    }
}

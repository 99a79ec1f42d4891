//! Quantities and their algebra
//!
//! A [`Quantity`] is a `(value, dimension)` pair tied to a shared system. The
//! system parameter decides which conversions are available: a
//! [`PhysicalQuantity`] only supports the algebra, while a
//! [`crate::MeasurementQuantity`] additionally converts between measurement
//! systems. The algebra is identical for both and implemented once here.
//!
//! All operations are pure: operands are borrowed and a new quantity is returned.
//! Combining two quantities requires that they reference the same system
//! instance (`Arc::ptr_eq`), not merely structurally equal systems.
//!
//! # Usage
//! ```
//! use std::sync::Arc;
//! use units_core::{PhysicalQuantity, PhysicalSystem};
//!
//! let ltm = Arc::new(PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).unwrap());
//! let distance = PhysicalQuantity::new(100.0, [1.0, 0.0, 0.0], &ltm).unwrap();
//! let time = PhysicalQuantity::new(9.58, [0.0, 1.0, 0.0], &ltm).unwrap();
//!
//! let speed = distance.divide(&time).unwrap();
//! assert_eq!(speed.dimension().exponents(), &[1.0, -1.0, 0.0]);
//! assert!((speed.value() - 10.438).abs() < 1e-3);
//! ```

use std::fmt;
use std::sync::Arc;

use super::dimension::Dimension;
use super::physical_system::{DimensionalSystem, PhysicalSystem};
use crate::error::{Result, UnitsError};

/// Value and dimension expressed in the system `S`
pub struct Quantity<S: DimensionalSystem> {
    value: f64,
    dimension: Dimension,
    system: Arc<S>,
    name: Option<String>,
}

/// Quantity expressed directly in a [`PhysicalSystem`]
pub type PhysicalQuantity = Quantity<PhysicalSystem>;

impl<S: DimensionalSystem> Quantity<S> {
    /// Create a quantity, validating it against its system.
    ///
    /// # Arguments
    /// * `value` - Magnitude, must be finite (zero and negative are allowed)
    /// * `dimension` - Exponents over the system's base quantities
    /// * `system` - Shared system the quantity lives in
    ///
    /// # Errors
    /// - [`UnitsError::InvalidValue`] if `value` or an exponent is NaN or infinite
    /// - [`UnitsError::DimensionArityMismatch`] if the dimension length is wrong
    pub fn new(value: f64, dimension: impl Into<Dimension>, system: &Arc<S>) -> Result<Self> {
        let dimension = check_exponents(dimension.into(), "Quantity::new")?;
        UnitsError::check_finite(value, "Quantity::new")?;
        system.check_arity(dimension.len())?;
        Ok(Self::from_parts(value, dimension, Arc::clone(system)))
    }

    /// Build without validation; callers guarantee arity and finiteness.
    #[inline]
    pub(crate) fn from_parts(value: f64, dimension: Dimension, system: Arc<S>) -> Self {
        Quantity {
            value,
            dimension,
            system,
            name: None,
        }
    }

    /// Attach a name (e.g. a unit symbol) to this quantity
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Copy the name of `other` onto this quantity (used across conversions)
    pub(crate) fn named_like<T: DimensionalSystem>(mut self, other: &Quantity<T>) -> Self {
        self.name.clone_from(&other.name);
        self
    }

    /// Magnitude in the units of the system
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Exponents over the system's base quantities
    #[inline]
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// The shared system this quantity lives in
    #[inline]
    pub fn system(&self) -> &Arc<S> {
        &self.system
    }

    /// Optional name, set for units minted by a system
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when every exponent is zero
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// True when both quantities reference the same system instance
    #[inline]
    pub fn same_system(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.system, &other.system)
    }

    // ========================================================================
    // SCALAR ALGEBRA
    // ========================================================================

    /// Multiply by a plain number; the dimension is unchanged.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the product is not finite.
    pub fn scale(&self, k: f64) -> Result<Self> {
        let value = UnitsError::check_finite(self.value * k, "Quantity::scale")?;
        Ok(self.derive(value, self.dimension.clone()))
    }

    /// Divide by a plain number; the dimension is unchanged.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the quotient is not finite (e.g. `k == 0`).
    pub fn divide_scalar(&self, k: f64) -> Result<Self> {
        let value = UnitsError::check_finite(self.value / k, "Quantity::divide_scalar")?;
        Ok(self.derive(value, self.dimension.clone()))
    }

    /// Compute `k / self`: inverted value, negated dimension.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the quotient is not finite (e.g. zero value).
    pub fn reciprocal(&self, k: f64) -> Result<Self> {
        let value = UnitsError::check_finite(k / self.value, "Quantity::reciprocal")?;
        Ok(self.derive(value, -&self.dimension))
    }

    /// Raise to a real power; the dimension is scaled by `p`.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if `p` is not finite, or the result is not a
    /// finite real (e.g. a fractional power of a negative value).
    pub fn powf(&self, p: f64) -> Result<Self> {
        UnitsError::check_finite(p, "Quantity::powf")?;
        let value = UnitsError::check_finite(self.value.powf(p), "Quantity::powf")?;
        let dimension = check_exponents(self.dimension.scale(p), "Quantity::powf")?;
        Ok(self.derive(value, dimension))
    }

    /// Raise to an integer power; the dimension is scaled by `n`.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the value or an exponent overflows, or the
    /// value divides by zero.
    pub fn powi(&self, n: i32) -> Result<Self> {
        let value = UnitsError::check_finite(self.value.powi(n), "Quantity::powi")?;
        let dimension = check_exponents(self.dimension.scale(f64::from(n)), "Quantity::powi")?;
        Ok(self.derive(value, dimension))
    }

    // ========================================================================
    // QUANTITY ALGEBRA
    // ========================================================================

    /// Product of two quantities of the same system: values multiply, dimensions add.
    ///
    /// # Errors
    /// - [`UnitsError::SystemMismatch`] if the systems differ
    /// - [`UnitsError::InvalidValue`] if the product overflows
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_same_system(other)?;
        let value = UnitsError::check_finite(self.value * other.value, "Quantity::multiply")?;
        let dimension =
            check_exponents(&self.dimension + &other.dimension, "Quantity::multiply")?;
        Ok(self.derive(value, dimension))
    }

    /// Quotient of two quantities of the same system: values divide, dimensions subtract.
    ///
    /// # Errors
    /// - [`UnitsError::SystemMismatch`] if the systems differ
    /// - [`UnitsError::InvalidValue`] if the quotient is not finite
    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.check_same_system(other)?;
        let value = UnitsError::check_finite(self.value / other.value, "Quantity::divide")?;
        let dimension =
            check_exponents(&self.dimension - &other.dimension, "Quantity::divide")?;
        Ok(self.derive(value, dimension))
    }

    /// Sum of two quantities of the same system and dimension.
    ///
    /// # Errors
    /// - [`UnitsError::SystemMismatch`] if the systems differ
    /// - [`UnitsError::DimensionMismatch`] if the dimensions differ
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_dimension(other)?;
        let value = UnitsError::check_finite(self.value + other.value, "Quantity::add")?;
        Ok(self.derive(value, self.dimension.clone()))
    }

    /// Difference of two quantities of the same system and dimension.
    ///
    /// # Errors
    /// - [`UnitsError::SystemMismatch`] if the systems differ
    /// - [`UnitsError::DimensionMismatch`] if the dimensions differ
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.check_same_dimension(other)?;
        let value = UnitsError::check_finite(self.value - other.value, "Quantity::subtract")?;
        Ok(self.derive(value, self.dimension.clone()))
    }

    #[inline]
    fn derive(&self, value: f64, dimension: Dimension) -> Self {
        Self::from_parts(value, dimension, Arc::clone(&self.system))
    }

    fn check_same_system(&self, other: &Self) -> Result<()> {
        if self.same_system(other) {
            Ok(())
        } else {
            Err(UnitsError::SystemMismatch {
                left: self.system.name().to_string(),
                right: other.system.name().to_string(),
            })
        }
    }

    fn check_same_dimension(&self, other: &Self) -> Result<()> {
        self.check_same_system(other)?;
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(UnitsError::DimensionMismatch {
                left: self.dimension.exponents().to_vec(),
                right: other.dimension.exponents().to_vec(),
            })
        }
    }
}

/// Reject dimensions carrying a NaN or infinite exponent.
fn check_exponents(dimension: Dimension, context: &'static str) -> Result<Dimension> {
    if dimension.is_finite() {
        return Ok(dimension);
    }
    let value = dimension
        .exponents()
        .iter()
        .copied()
        .find(|e| !e.is_finite())
        .unwrap_or(f64::NAN);
    Err(UnitsError::InvalidValue { context, value })
}

// Manual impls: derives would demand `S: Clone`/`S: PartialEq` although only the
// `Arc` is cloned or compared.
impl<S: DimensionalSystem> Clone for Quantity<S> {
    fn clone(&self) -> Self {
        Quantity {
            value: self.value,
            dimension: self.dimension.clone(),
            system: Arc::clone(&self.system),
            name: self.name.clone(),
        }
    }
}

/// Equal value, equal dimension and the same system instance; names are ignored.
impl<S: DimensionalSystem> PartialEq for Quantity<S> {
    fn eq(&self, other: &Self) -> bool {
        self.same_system(other) && self.value == other.value && self.dimension == other.dimension
    }
}

impl<S: DimensionalSystem> fmt::Debug for Quantity<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value)
            .field("dimension", &self.dimension.exponents())
            .field("system", &self.system.name())
            .field("name", &self.name)
            .finish()
    }
}

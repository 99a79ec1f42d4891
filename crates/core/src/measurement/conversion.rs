//! Conversions between measurement systems
//!
//! Conversions go through the underlying physical system as the common frame:
//!
//! - `to_underlying`:     `v' = v · M_self`
//! - `to_system(other)`:  `v' = v · M_self · M_other⁻¹`
//! - `express`:           `v' = v · M⁻¹`
//!
//! where `v = [ln|value|, dim_0, …, dim_{N-1}]`. Every conversion is a pure
//! function of immutable systems, so batches can be spread across threads.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::trace;

use super::system::MeasurementSystem;
use super::transfer::transform;
use super::MeasurementQuantity;
use crate::core_types::{Dimension, DimensionalSystem, PhysicalQuantity, Quantity};
use crate::error::{Result, UnitsError};

impl Quantity<MeasurementSystem> {
    /// Express this quantity in the underlying physical system.
    ///
    /// The name, if any, is kept: the result is the same physical quantity.
    ///
    /// # Errors
    /// [`UnitsError::InvalidValue`] if the converted magnitude overflows `f64`.
    pub fn to_underlying(&self) -> Result<PhysicalQuantity> {
        let system = self.system();
        let (value, dimension) =
            transform(self.value(), self.dimension(), &[system.transfer().matrix()])?;
        trace!("{} -> {}: {:e}", system.name(), system.physical_system().name(), value);
        let physical = Arc::clone(system.physical_system());
        Ok(Quantity::from_parts(value, dimension, physical).named_like(self))
    }

    /// Express this quantity in another measurement system over the same
    /// physical system. Converting into the own system returns a copy.
    ///
    /// # Errors
    /// - [`UnitsError::IncompatibleUnderlyingSystem`] if the physical systems differ
    /// - [`UnitsError::InvalidValue`] if the converted magnitude overflows `f64`
    pub fn to_system(&self, target: &Arc<MeasurementSystem>) -> Result<MeasurementQuantity> {
        let source = self.system();
        if Arc::ptr_eq(source, target) {
            return Ok(self.clone());
        }
        if !source.shares_underlying_with(target) {
            return Err(UnitsError::IncompatibleUnderlyingSystem {
                from: source.name().to_string(),
                to: target.name().to_string(),
            });
        }

        let (value, dimension) = transform(
            self.value(),
            self.dimension(),
            &[source.transfer().matrix(), target.transfer().inverse()],
        )?;
        trace!("{} -> {}: {:e}", source.name(), target.name(), value);
        Ok(Quantity::from_parts(value, dimension, Arc::clone(target)).named_like(self))
    }
}

impl MeasurementSystem {
    /// Express a quantity of the underlying physical system in this system.
    ///
    /// # Errors
    /// - [`UnitsError::IncompatibleUnderlyingSystem`] if `quantity` lives in
    ///   another physical system instance
    /// - [`UnitsError::InvalidValue`] if the converted magnitude overflows `f64`
    pub fn express(
        self: &Arc<Self>,
        quantity: &PhysicalQuantity,
    ) -> Result<MeasurementQuantity> {
        if !Arc::ptr_eq(quantity.system(), self.physical_system()) {
            return Err(UnitsError::IncompatibleUnderlyingSystem {
                from: quantity.system().name().to_string(),
                to: self.name().to_string(),
            });
        }
        let (value, dimension) = transform(
            quantity.value(),
            quantity.dimension(),
            &[self.transfer().inverse()],
        )?;
        Ok(Quantity::from_parts(value, dimension, Arc::clone(self)).named_like(quantity))
    }

    /// Mint the value-1 quantity of this system with the shape of `quantity`,
    /// converting it into this system first if needed (e.g. "one newton").
    ///
    /// # Errors
    /// [`UnitsError::IncompatibleUnderlyingSystem`] if `quantity` cannot be
    /// expressed in this system.
    pub fn one_unit(self: &Arc<Self>, quantity: &AnyQuantity) -> Result<MeasurementQuantity> {
        let dimension = match quantity {
            AnyQuantity::Measurement(q) => q.to_system(self)?.dimension().clone(),
            AnyQuantity::Physical(q) => self.express(q)?.dimension().clone(),
        };
        Ok(Quantity::from_parts(1.0, dimension, Arc::clone(self)))
    }

    /// Convert a batch of quantities into `target` on the rayon thread pool.
    ///
    /// Order is preserved. The first failing conversion aborts the batch.
    ///
    /// # Errors
    /// See [`Quantity::to_system`].
    pub fn convert_all(
        quantities: &[MeasurementQuantity],
        target: &Arc<MeasurementSystem>,
    ) -> Result<Vec<MeasurementQuantity>> {
        quantities.par_iter().map(|q| q.to_system(target)).collect()
    }
}

/// Either kind of quantity, for call sites that accept both
#[derive(Debug, Clone, PartialEq)]
pub enum AnyQuantity {
    /// Quantity of a bare physical system
    Physical(PhysicalQuantity),
    /// Quantity of a measurement system
    Measurement(MeasurementQuantity),
}

impl AnyQuantity {
    /// Magnitude in the units of its own system
    pub fn value(&self) -> f64 {
        match self {
            AnyQuantity::Physical(q) => q.value(),
            AnyQuantity::Measurement(q) => q.value(),
        }
    }

    /// Exponents over the base quantities of its own system
    pub fn dimension(&self) -> &Dimension {
        match self {
            AnyQuantity::Physical(q) => q.dimension(),
            AnyQuantity::Measurement(q) => q.dimension(),
        }
    }

    /// Name of the system the quantity lives in
    pub fn system_name(&self) -> &str {
        match self {
            AnyQuantity::Physical(q) => q.system().name(),
            AnyQuantity::Measurement(q) => q.system().name(),
        }
    }

    /// The quantity in its physical system (a copy for physical quantities).
    ///
    /// # Errors
    /// See [`Quantity::to_underlying`].
    pub fn to_underlying(&self) -> Result<PhysicalQuantity> {
        match self {
            AnyQuantity::Physical(q) => Ok(q.clone()),
            AnyQuantity::Measurement(q) => q.to_underlying(),
        }
    }
}

impl From<PhysicalQuantity> for AnyQuantity {
    fn from(q: PhysicalQuantity) -> Self {
        AnyQuantity::Physical(q)
    }
}

impl From<MeasurementQuantity> for AnyQuantity {
    fn from(q: MeasurementQuantity) -> Self {
        AnyQuantity::Measurement(q)
    }
}

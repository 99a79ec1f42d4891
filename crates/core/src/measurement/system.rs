//! Measurement systems
//!
//! A [`MeasurementSystem`] chooses one defining unit per base quantity of an
//! underlying [`PhysicalSystem`]. The defining units need not be aligned with the
//! base quantities of the physical system: the HEP system, for instance, defines
//! energy (`GeV`), velocity (`c`) and action (`hbar`) over length, time and mass.
//!
//! The system is built once, validated eagerly and immutable afterwards. It is
//! shared behind an `Arc` by every [`MeasurementQuantity`] expressed in it.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

use super::transfer::TransferMatrix;
use super::MeasurementQuantity;
use crate::core_types::physical_system::validate_names;
use crate::core_types::{
    BaseQuantity, Dimension, DimensionalSystem, PhysicalQuantity, PhysicalSystem, Quantity,
};
use crate::error::{Result, UnitsError};

/// A named defining unit, e.g. `("V", "c", 299792458 m/s)`
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDefinition {
    /// Name of the base quantity this unit measures (e.g. `"V"` for velocity)
    pub quantity: String,
    /// Unit symbol (e.g. `"c"`)
    pub symbol: String,
    /// Magnitude and dimension in the underlying physical system
    pub value: PhysicalQuantity,
}

impl UnitDefinition {
    /// Create a defining unit from its quantity name, symbol and underlying value
    pub fn new(
        quantity: impl Into<String>,
        symbol: impl Into<String>,
        value: PhysicalQuantity,
    ) -> Self {
        UnitDefinition {
            quantity: quantity.into(),
            symbol: symbol.into(),
            value,
        }
    }
}

/// Concrete unit basis over an underlying physical system
#[derive(Debug)]
pub struct MeasurementSystem {
    name: String,
    physical_system: Arc<PhysicalSystem>,
    definitions: Vec<UnitDefinition>,
    base: Vec<BaseQuantity>,
    transfer: TransferMatrix,
    symbols: FxHashMap<String, usize>,
}

impl MeasurementSystem {
    /// Build a measurement system from N defining units.
    ///
    /// All validation happens before the transfer matrix is assembled.
    ///
    /// # Arguments
    /// * `name` - Display name (e.g. `"HEP"`)
    /// * `physical_system` - Underlying system with N base quantities
    /// * `definitions` - Exactly N defining units expressed in `physical_system`
    ///
    /// # Errors
    /// - [`UnitsError::DimensionArityMismatch`] if there are not exactly N definitions
    /// - [`UnitsError::EmptySystem`], [`UnitsError::MissingUnitName`],
    ///   [`UnitsError::DuplicateName`] for bad quantity names or symbols
    /// - [`UnitsError::SystemMismatch`] if a value lives in another physical system
    /// - [`UnitsError::ZeroValuedUnit`] / [`UnitsError::NegativeValuedUnit`] for
    ///   non-positive values
    /// - [`UnitsError::SingularBasis`] if the definitions are dimensionally dependent
    pub fn new(
        name: impl Into<String>,
        physical_system: &Arc<PhysicalSystem>,
        definitions: Vec<UnitDefinition>,
    ) -> Result<Arc<Self>> {
        let name = name.into();

        if definitions.len() != physical_system.base_count() {
            return Err(UnitsError::DimensionArityMismatch {
                system: name,
                expected: physical_system.base_count(),
                actual: definitions.len(),
            });
        }
        validate_names(
            &name,
            definitions
                .iter()
                .map(|d| (d.quantity.as_str(), d.symbol.as_str())),
        )?;

        for definition in &definitions {
            let value = &definition.value;
            if !Arc::ptr_eq(value.system(), physical_system) {
                return Err(UnitsError::SystemMismatch {
                    left: value.system().name().to_string(),
                    right: physical_system.name().to_string(),
                });
            }
            if value.value() == 0.0 {
                return Err(UnitsError::ZeroValuedUnit {
                    symbol: definition.symbol.clone(),
                });
            }
            if value.value() < 0.0 {
                return Err(UnitsError::NegativeValuedUnit {
                    symbol: definition.symbol.clone(),
                    value: value.value(),
                });
            }
        }

        let values: Vec<&PhysicalQuantity> = definitions.iter().map(|d| &d.value).collect();
        let transfer = TransferMatrix::from_definitions(&name, &values)?;

        let base = definitions
            .iter()
            .map(|d| BaseQuantity::new(d.quantity.clone(), d.symbol.clone()))
            .collect();
        let symbols = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.symbol.clone(), i))
            .collect();

        debug!(
            "Built measurement system '{}' over '{}' ({} defining units)",
            name,
            physical_system.name(),
            definitions.len()
        );
        Ok(Arc::new(MeasurementSystem {
            name,
            physical_system: Arc::clone(physical_system),
            definitions,
            base,
            transfer,
            symbols,
        }))
    }

    /// Measurement system whose defining units are the physical system's own base
    /// units: value 1 and a one-hot dimension each (the SI system over LTM).
    ///
    /// # Errors
    /// Same as [`MeasurementSystem::new`]; a valid physical system never fails.
    pub fn natural(
        name: impl Into<String>,
        physical_system: &Arc<PhysicalSystem>,
    ) -> Result<Arc<Self>> {
        let n = physical_system.base_count();
        let definitions = physical_system
            .base()
            .iter()
            .enumerate()
            .map(|(i, base)| {
                let unit =
                    Quantity::from_parts(1.0, Dimension::one_hot(n, i), Arc::clone(physical_system));
                UnitDefinition::new(base.quantity.clone(), base.unit.clone(), unit)
            })
            .collect();
        Self::new(name, physical_system, definitions)
    }

    /// The underlying physical system
    #[inline]
    pub fn physical_system(&self) -> &Arc<PhysicalSystem> {
        &self.physical_system
    }

    /// Defining units in declaration order
    #[inline]
    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.definitions
    }

    /// Log-linear transfer matrix and its inverse
    #[inline]
    pub fn transfer(&self) -> &TransferMatrix {
        &self.transfer
    }

    /// True when both systems are built over the same physical system instance
    pub fn shares_underlying_with(&self, other: &MeasurementSystem) -> bool {
        Arc::ptr_eq(&self.physical_system, &other.physical_system)
    }

    /// The N unit quantities of this system, value 1 with one-hot dimensions,
    /// each named after its symbol (e.g. `m`, `s`, `kg`).
    pub fn base_quantities(self: &Arc<Self>) -> Vec<MeasurementQuantity> {
        (0..self.base_count()).map(|i| self.base_unit(i)).collect()
    }

    /// Unit quantity for a symbol.
    ///
    /// # Errors
    /// [`UnitsError::UnknownUnit`] if the symbol is not defined by this system.
    pub fn unit(self: &Arc<Self>, symbol: &str) -> Result<MeasurementQuantity> {
        self.symbols
            .get(symbol)
            .map(|&i| self.base_unit(i))
            .ok_or_else(|| UnitsError::UnknownUnit {
                system: self.name.clone(),
                symbol: symbol.to_string(),
            })
    }

    /// Shortcut for [`Quantity::new`] in this system.
    ///
    /// # Errors
    /// See [`Quantity::new`].
    pub fn quantity(
        self: &Arc<Self>,
        value: f64,
        dimension: impl Into<Dimension>,
    ) -> Result<MeasurementQuantity> {
        Quantity::new(value, dimension, self)
    }

    fn base_unit(self: &Arc<Self>, index: usize) -> MeasurementQuantity {
        Quantity::from_parts(
            1.0,
            Dimension::one_hot(self.base_count(), index),
            Arc::clone(self),
        )
        .with_name(self.definitions[index].symbol.clone())
    }
}

impl DimensionalSystem for MeasurementSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> &[BaseQuantity] {
        &self.base
    }
}

//! Physical systems of base quantities
//!
//! A [`PhysicalSystem`] is purely descriptive: an ordered list of named base
//! quantities with the canonical symbol of their unit. It carries no values.
//! Quantities hold an `Arc` to their system and are only combinable with
//! quantities that point at the very same instance.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{Result, UnitsError};

/// One base quantity of a system, e.g. `("L", "m")`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseQuantity {
    /// Name of the quantity (e.g. `"L"` for length)
    pub quantity: String,
    /// Symbol of its unit (e.g. `"m"`)
    pub unit: String,
}

impl BaseQuantity {
    /// Create a base quantity from a name and a unit symbol
    pub fn new(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        BaseQuantity {
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

impl<Q: Into<String>, U: Into<String>> From<(Q, U)> for BaseQuantity {
    fn from((quantity, unit): (Q, U)) -> Self {
        BaseQuantity::new(quantity, unit)
    }
}

/// Capability shared by every system a quantity can live in.
///
/// Both [`PhysicalSystem`] and [`crate::MeasurementSystem`] implement it, which lets
/// [`crate::Quantity`] carry the same algebra over either kind of system.
pub trait DimensionalSystem: fmt::Debug + Send + Sync {
    /// Display name of the system
    fn name(&self) -> &str;

    /// Ordered base quantities (name and unit symbol)
    fn base(&self) -> &[BaseQuantity];

    /// Number of base quantities, i.e. the required dimension length
    fn base_count(&self) -> usize {
        self.base().len()
    }

    /// Verify that a dimension vector of `len` exponents fits this system.
    ///
    /// # Errors
    /// [`UnitsError::DimensionArityMismatch`] if `len` differs from the base count.
    fn check_arity(&self, len: usize) -> Result<()> {
        let expected = self.base_count();
        if len == expected {
            Ok(())
        } else {
            Err(UnitsError::DimensionArityMismatch {
                system: self.name().to_string(),
                expected,
                actual: len,
            })
        }
    }
}

/// Abstract system of N independent base quantities
///
/// # Example
/// ```
/// use units_core::{DimensionalSystem, PhysicalSystem};
///
/// let ltm = PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).unwrap();
/// assert_eq!(ltm.base_count(), 3);
/// assert_eq!(ltm.base()[2].unit, "kg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalSystem {
    name: String,
    quantities: Vec<BaseQuantity>,
}

impl PhysicalSystem {
    /// Declare a physical system.
    ///
    /// # Arguments
    /// * `name` - Display name (e.g. `"LTM"`)
    /// * `quantities` - Ordered `(quantity, unit)` pairs
    ///
    /// # Errors
    /// - [`UnitsError::EmptySystem`] if no base quantity is given
    /// - [`UnitsError::MissingUnitName`] if a name or symbol is empty
    /// - [`UnitsError::DuplicateName`] if a quantity name or unit symbol repeats
    pub fn new<I, B>(name: impl Into<String>, quantities: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<BaseQuantity>,
    {
        let name = name.into();
        let quantities: Vec<BaseQuantity> = quantities.into_iter().map(Into::into).collect();
        validate_names(&name, quantities.iter().map(|q| (q.quantity.as_str(), q.unit.as_str())))?;

        debug!(
            "Declared physical system '{}' with {} base quantities",
            name,
            quantities.len()
        );
        Ok(PhysicalSystem { name, quantities })
    }
}

impl DimensionalSystem for PhysicalSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> &[BaseQuantity] {
        &self.quantities
    }
}

/// Check N >= 1, no empty entries, and distinct names and symbols.
pub(crate) fn validate_names<'a>(
    system: &str,
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<()> {
    let mut quantities = FxHashSet::default();
    let mut units = FxHashSet::default();
    for (index, (quantity, unit)) in entries.into_iter().enumerate() {
        if quantity.is_empty() || unit.is_empty() {
            return Err(UnitsError::MissingUnitName {
                system: system.to_string(),
                index,
            });
        }
        for (seen, name) in [(&mut quantities, quantity), (&mut units, unit)] {
            if !seen.insert(name) {
                return Err(UnitsError::DuplicateName {
                    system: system.to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    if quantities.is_empty() {
        return Err(UnitsError::EmptySystem {
            system: system.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_ordered_base_quantities() {
        let ltm = PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).unwrap();
        assert_eq!(ltm.name(), "LTM");
        assert_eq!(ltm.base_count(), 3);
        assert_eq!(ltm.base()[0], BaseQuantity::new("L", "m"));
        assert_eq!(ltm.base()[1].quantity, "T");
    }

    #[test]
    fn test_rejects_empty_system() {
        let empty: [(&str, &str); 0] = [];
        assert!(matches!(
            PhysicalSystem::new("Nothing", empty),
            Err(UnitsError::EmptySystem { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        assert!(matches!(
            PhysicalSystem::new("Dup", [("L", "m"), ("L", "ft")]),
            Err(UnitsError::DuplicateName { name, .. }) if name == "L"
        ));
        assert!(matches!(
            PhysicalSystem::new("Dup", [("L", "m"), ("X", "m")]),
            Err(UnitsError::DuplicateName { name, .. }) if name == "m"
        ));
        assert!(matches!(
            PhysicalSystem::new("Blank", [("L", "m"), ("T", "")]),
            Err(UnitsError::MissingUnitName { index: 1, .. })
        ));
    }

    #[test]
    fn test_check_arity() {
        let ltm = PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).unwrap();
        assert!(ltm.check_arity(3).is_ok());
        assert_eq!(
            ltm.check_arity(2),
            Err(UnitsError::DimensionArityMismatch {
                system: "LTM".to_string(),
                expected: 3,
                actual: 2,
            })
        );
    }
}

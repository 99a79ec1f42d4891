//! Serde configuration documents for systems
//!
//! These mirror the preset tables as plain data so that systems can be declared
//! in JSON (or any other serde format) and built through the same validating
//! constructors as the code presets.
//!
//! ```json
//! {
//!   "name": "HEP",
//!   "definitions": [
//!     { "quantity": "E", "symbol": "GeV", "value": 1.602176634e-19,
//!       "dimension": [2, -2, 1], "prefix": "giga" },
//!     { "quantity": "V", "symbol": "c", "value": 299792458, "dimension": [1, -1, 0] },
//!     { "quantity": "J", "symbol": "hbar", "value": 1.0545718e-34, "dimension": [2, -1, 1] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ltm::{ELECTRON_VOLT, REDUCED_PLANCK, SPEED_OF_LIGHT};
use super::prefixes::Prefix;
use crate::core_types::{BaseQuantity, Dimension, PhysicalQuantity, PhysicalSystem};
use crate::error::Result;
use crate::measurement::{MeasurementSystem, UnitDefinition};

/// Declaration of a physical system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSystemConfig {
    /// Display name
    pub name: String,
    /// Ordered base quantities
    pub base_quantities: Vec<BaseQuantity>,
}

impl PhysicalSystemConfig {
    /// The LTM table
    pub fn ltm() -> Self {
        PhysicalSystemConfig {
            name: "LTM".to_string(),
            base_quantities: vec![
                BaseQuantity::new("L", "m"),
                BaseQuantity::new("T", "s"),
                BaseQuantity::new("M", "kg"),
            ],
        }
    }

    /// Build the declared system.
    ///
    /// # Errors
    /// See [`PhysicalSystem::new`].
    pub fn build(&self) -> Result<Arc<PhysicalSystem>> {
        PhysicalSystem::new(self.name.clone(), self.base_quantities.iter().cloned()).map(Arc::new)
    }
}

/// One defining unit, with its value expressed in the underlying system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionConfig {
    /// Name of the measured quantity (e.g. `"V"`)
    pub quantity: String,
    /// Unit symbol (e.g. `"c"`)
    pub symbol: String,
    /// Magnitude in the underlying system's units
    pub value: f64,
    /// Exponents over the underlying system's base quantities
    pub dimension: Dimension,
    /// Optional metric prefix multiplied into `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Prefix>,
}

impl DefinitionConfig {
    fn build(&self, underlying: &Arc<PhysicalSystem>) -> Result<UnitDefinition> {
        let factor = self.prefix.map_or(1.0, Prefix::factor);
        let value = PhysicalQuantity::new(self.value * factor, self.dimension.clone(), underlying)?;
        Ok(UnitDefinition::new(
            self.quantity.clone(),
            self.symbol.clone(),
            value,
        ))
    }
}

/// Declaration of a measurement system over some physical system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSystemConfig {
    /// Display name
    pub name: String,
    /// Exactly one defining unit per base quantity of the underlying system
    pub definitions: Vec<DefinitionConfig>,
}

impl MeasurementSystemConfig {
    /// The HEP table over LTM (`GeV`, `c`, `hbar`)
    pub fn hep() -> Self {
        let definition = |quantity: &str, symbol: &str, value, dimension: [f64; 3], prefix| {
            DefinitionConfig {
                quantity: quantity.to_string(),
                symbol: symbol.to_string(),
                value,
                dimension: Dimension::from(dimension),
                prefix,
            }
        };
        MeasurementSystemConfig {
            name: "HEP".to_string(),
            definitions: vec![
                definition("E", "GeV", ELECTRON_VOLT, [2.0, -2.0, 1.0], Some(Prefix::Giga)),
                definition("V", "c", SPEED_OF_LIGHT, [1.0, -1.0, 0.0], None),
                definition("J", "hbar", REDUCED_PLANCK, [2.0, -1.0, 1.0], None),
            ],
        }
    }

    /// Build the declared system over `underlying`.
    ///
    /// # Errors
    /// Any [`crate::UnitsError`] raised by [`PhysicalQuantity::new`] or
    /// [`MeasurementSystem::new`].
    pub fn build(&self, underlying: &Arc<PhysicalSystem>) -> Result<Arc<MeasurementSystem>> {
        let definitions = self
            .definitions
            .iter()
            .map(|d| d.build(underlying))
            .collect::<Result<Vec<_>>>()?;
        MeasurementSystem::new(self.name.clone(), underlying, definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitsError;
    use approx::assert_relative_eq;

    #[test]
    fn test_ltm_config_builds() {
        let ltm = PhysicalSystemConfig::ltm().build().unwrap();
        let expected = PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).unwrap();
        assert_eq!(*ltm, expected);
    }

    #[test]
    fn test_hep_config_applies_prefix() {
        let ltm = PhysicalSystemConfig::ltm().build().unwrap();
        let hep = MeasurementSystemConfig::hep().build(&ltm).unwrap();
        let gev = &hep.definitions()[0];
        assert_relative_eq!(gev.value.value(), 1.602176634e-10, max_relative = 1e-15);
    }

    #[test]
    fn test_parse_from_json() {
        let json = r#"{
            "name": "km-h-t",
            "definitions": [
                { "quantity": "L", "symbol": "km", "value": 1, "dimension": [1, 0, 0], "prefix": "kilo" },
                { "quantity": "T", "symbol": "h", "value": 3600, "dimension": [0, 1, 0] },
                { "quantity": "M", "symbol": "t", "value": 1000, "dimension": [0, 0, 1] }
            ]
        }"#;
        let config: MeasurementSystemConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.definitions[0].prefix, Some(Prefix::Kilo));
        assert_eq!(config.definitions[1].prefix, None);

        let ltm = PhysicalSystemConfig::ltm().build().unwrap();
        let system = config.build(&ltm).unwrap();
        let kmh = system.quantity(36.0, [1.0, -1.0, 0.0]).unwrap();
        assert_relative_eq!(kmh.to_underlying().unwrap().value(), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_parsed_dimensions_are_snapped() {
        let json = r#"{
            "name": "HEP",
            "definitions": [
                { "quantity": "E", "symbol": "GeV", "value": 1.602176634e-19,
                  "dimension": [2.0000000001, -2, 1], "prefix": "giga" },
                { "quantity": "V", "symbol": "c", "value": 299792458,
                  "dimension": [1, -0.9999999999, 0] },
                { "quantity": "J", "symbol": "hbar", "value": 1.0545718e-34,
                  "dimension": [2, -1, 1.0000000001] }
            ]
        }"#;
        let config: MeasurementSystemConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, MeasurementSystemConfig::hep());
    }

    #[test]
    fn test_config_errors_surface() {
        let mut config = MeasurementSystemConfig::hep();
        config.definitions[2].value = 0.0;
        let ltm = PhysicalSystemConfig::ltm().build().unwrap();
        assert!(matches!(
            config.build(&ltm),
            Err(UnitsError::ZeroValuedUnit { .. })
        ));

        let mut config = MeasurementSystemConfig::hep();
        config.definitions[0].dimension = Dimension::from([1.0, 0.0]);
        assert!(matches!(
            config.build(&ltm),
            Err(UnitsError::DimensionArityMismatch { .. })
        ));
    }

    #[test]
    fn test_config_serializes_without_empty_prefix() {
        let json = serde_json::to_value(MeasurementSystemConfig::hep()).unwrap();
        assert_eq!(json["definitions"][0]["prefix"], "giga");
        assert!(json["definitions"][1].get("prefix").is_none());
    }
}

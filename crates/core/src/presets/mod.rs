//! Preset configuration: the LTM physical system, SI and HEP measurement
//! systems, metric prefixes, and serde documents describing systems as data
//!
//! Presets are built on demand by factory functions. Callers hold the returned
//! systems and unit bindings explicitly; there is no process-wide registry.

pub mod config;
pub mod ltm;
pub mod prefixes;

pub use config::{DefinitionConfig, MeasurementSystemConfig, PhysicalSystemConfig};
pub use ltm::{
    build_hep_system, build_si_system, hep, ltm, HepUnits, SiUnits, ELECTRON_VOLT,
    REDUCED_PLANCK, SPEED_OF_LIGHT,
};
pub use prefixes::Prefix;

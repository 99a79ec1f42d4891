//! Dimensional Analysis Core Library
//!
//! Physical quantities as `(value, dimension)` pairs inside a physical system of
//! base quantities, and conversion of quantities between measurement systems that
//! pick different defining units for the same physical system (e.g. SI and a
//! particle-physics system where `c = hbar = 1`).
//!
//! ## Layout
//!
//! - [`core_types`]: dimensions, physical systems and the quantity algebra
//! - [`measurement`]: measurement systems, log-linear transfer matrices, conversions
//! - [`presets`]: LTM / SI / HEP factories, metric prefixes, serde configuration
//!
//! ## Example
//!
//! ```rust
//! use units_core::presets::build_si_system;
//!
//! let si = build_si_system().unwrap();
//! let newton = si
//!     .kg
//!     .multiply(&si.m)
//!     .and_then(|q| q.divide(&si.s.powi(2)?))
//!     .unwrap();
//! assert_eq!(newton.dimension().exponents(), &[1.0, -2.0, 1.0]);
//! assert!((newton.to_underlying().unwrap().value() - 1.0).abs() < 1e-12);
//! ```

// Core types and the quantity algebra
pub mod core_types;

pub mod error;

// Measurement systems and conversions
pub mod measurement;

// Preset systems and configuration documents
pub mod presets;

// Re-export core types
pub use core_types::{
    BaseQuantity, Dimension, DimensionalSystem, PhysicalQuantity, PhysicalSystem, Quantity,
};
pub use error::{Result, UnitsError};

// Re-export measurement types
pub use measurement::{
    AnyQuantity, MeasurementQuantity, MeasurementSystem, TransferMatrix, UnitDefinition,
};
pub use presets::Prefix;

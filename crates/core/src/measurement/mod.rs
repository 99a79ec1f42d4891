//! Measurement systems and conversions between them
//!
//! A measurement system is a concrete choice of defining unit for each base
//! quantity of a physical system. Quantities expressed in one measurement system
//! convert into any other system built over the same physical system, using the
//! physical system as the common reference frame.
//!
//! # Example
//!
//! ```rust
//! use units_core::presets::build_hep_system;
//!
//! let hep = build_hep_system().unwrap();
//! let hbar_si = hep.hbar.to_underlying().unwrap();
//! assert!((hbar_si.value() - 1.0545718e-34).abs() < 1e-42);
//! assert_eq!(hbar_si.dimension().exponents(), &[2.0, -1.0, 1.0]);
//! ```

mod conversion;
mod system;
pub mod transfer;

pub use conversion::AnyQuantity;
pub use system::{MeasurementSystem, UnitDefinition};
pub use transfer::TransferMatrix;

use crate::core_types::Quantity;

/// Quantity expressed in a [`MeasurementSystem`]
pub type MeasurementQuantity = Quantity<MeasurementSystem>;

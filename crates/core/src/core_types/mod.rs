//! Core types: dimensions, physical systems and quantities

pub mod dimension;
pub mod physical_system;
pub mod quantity;

pub use dimension::{Dimension, EXPONENT_TOLERANCE};
pub use physical_system::{BaseQuantity, DimensionalSystem, PhysicalSystem};
pub use quantity::{PhysicalQuantity, Quantity};

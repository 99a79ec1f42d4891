//! LTM physical system with its SI and HEP measurement systems
//!
//! LTM is the physical system of length, time and mass. SI measures it with its
//! own base units; HEP measures it with energy (`GeV`), velocity (`c`) and action
//! (`hbar`), so that `c = hbar = 1`.
//!
//! Nothing here is global: every factory call builds fresh, independent systems
//! and hands the unit bindings back to the caller.

use std::sync::Arc;
use tracing::info;

use super::prefixes::Prefix;
use crate::core_types::{DimensionalSystem, PhysicalSystem};
use crate::error::Result;
use crate::measurement::{MeasurementQuantity, MeasurementSystem, UnitDefinition};

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 299792458.0;

/// Reduced Planck constant in m²·kg/s
pub const REDUCED_PLANCK: f64 = 1.0545718e-34;

/// Electron volt in kg·m²/s²
pub const ELECTRON_VOLT: f64 = 1.602176634e-19;

/// The LTM physical system: `[("L", "m"), ("T", "s"), ("M", "kg")]`
///
/// # Errors
/// Never fails for the built-in table; the `Result` mirrors [`PhysicalSystem::new`].
pub fn ltm() -> Result<Arc<PhysicalSystem>> {
    PhysicalSystem::new("LTM", [("L", "m"), ("T", "s"), ("M", "kg")]).map(Arc::new)
}

/// SI system with its base-unit bindings
#[derive(Debug, Clone)]
pub struct SiUnits {
    /// Underlying physical system
    pub ltm: Arc<PhysicalSystem>,
    /// The SI measurement system
    pub system: Arc<MeasurementSystem>,
    /// One metre
    pub m: MeasurementQuantity,
    /// One second
    pub s: MeasurementQuantity,
    /// One kilogram
    pub kg: MeasurementQuantity,
}

/// HEP system with its base-unit bindings and the SI system it was derived from
#[derive(Debug, Clone)]
pub struct HepUnits {
    /// SI system over the same LTM instance
    pub si: SiUnits,
    /// The HEP measurement system
    pub system: Arc<MeasurementSystem>,
    /// One `GeV`
    pub gev: MeasurementQuantity,
    /// Speed of light
    pub c: MeasurementQuantity,
    /// Reduced Planck constant
    pub hbar: MeasurementQuantity,
}

/// Build LTM and the SI system over it.
///
/// # Errors
/// Never fails for the built-in tables.
pub fn build_si_system() -> Result<SiUnits> {
    let ltm = ltm()?;
    let system = MeasurementSystem::natural("SI", &ltm)?;
    let m = system.unit("m")?;
    let s = system.unit("s")?;
    let kg = system.unit("kg")?;
    info!("Built SI measurement system over '{}'", ltm.name());
    Ok(SiUnits {
        ltm,
        system,
        m,
        s,
        kg,
    })
}

/// Build HEP over the LTM instance of an existing SI system.
///
/// The defining units are written with the SI algebra and then expressed in LTM:
///
/// ```text
/// GeV  = giga × 1.602176634e-19 kg·(m/s)²
/// c    = 299792458 m/s
/// hbar = 1.0545718e-34 m²/s·kg
/// ```
///
/// # Errors
/// Never fails for the built-in tables.
pub fn hep(si: &SiUnits) -> Result<Arc<MeasurementSystem>> {
    let SiUnits { ltm, m, s, kg, .. } = si;
    let velocity = m.divide(s)?;

    let c = velocity.scale(SPEED_OF_LIGHT)?;
    let hbar = m.powi(2)?.divide(s)?.multiply(kg)?.scale(REDUCED_PLANCK)?;
    let ev = kg.multiply(&velocity.powi(2)?)?.scale(ELECTRON_VOLT)?;
    let gev = Prefix::Giga.apply(&ev)?;

    MeasurementSystem::new(
        "HEP",
        ltm,
        vec![
            UnitDefinition::new("E", "GeV", gev.to_underlying()?),
            UnitDefinition::new("V", "c", c.to_underlying()?),
            UnitDefinition::new("J", "hbar", hbar.to_underlying()?),
        ],
    )
}

/// Build LTM, SI and HEP, all sharing one LTM instance.
///
/// # Errors
/// Never fails for the built-in tables.
pub fn build_hep_system() -> Result<HepUnits> {
    let si = build_si_system()?;
    let system = hep(&si)?;
    let gev = system.unit("GeV")?;
    let c = system.unit("c")?;
    let hbar = system.unit("hbar")?;
    info!("Built HEP measurement system (GeV, c, hbar)");
    Ok(HepUnits {
        si,
        system,
        gev,
        c,
        hbar,
    })
}

//! End-to-end scenarios for the SI and HEP measurement systems
//!
//! These exercise the public API as a downstream crate would: build the preset
//! systems, mint quantities from their unit bindings, and convert between them.

use std::sync::Arc;

use approx::assert_relative_eq;
use ctor::ctor;
use units_core::presets::{build_hep_system, build_si_system, ltm, MeasurementSystemConfig};
use units_core::{
    AnyQuantity, DimensionalSystem, MeasurementSystem, PhysicalQuantity, UnitDefinition,
    UnitsError,
};

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_hbar_in_underlying_system() {
    let hep = build_hep_system().unwrap();
    let hbar = hep.hbar.to_underlying().unwrap();

    assert_relative_eq!(hbar.value(), 1.0545718e-34, max_relative = 1e-9);
    assert_eq!(hbar.dimension().exponents(), &[2.0, -1.0, 1.0]);
    assert_eq!(hbar.system().name(), "LTM");
}

#[test]
fn test_newton_in_si() {
    let si = build_si_system().unwrap();
    let newton = si
        .kg
        .multiply(&si.m)
        .unwrap()
        .divide(&si.s.powi(2).unwrap())
        .unwrap();

    assert_eq!(newton.dimension().exponents(), &[1.0, -2.0, 1.0]);
    assert_relative_eq!(newton.to_underlying().unwrap().value(), 1.0, max_relative = 1e-12);
}

#[test]
fn test_hep_units_are_one_hot() {
    let hep = build_hep_system().unwrap();
    assert_eq!(hep.gev.dimension().exponents(), &[1.0, 0.0, 0.0]);
    assert_eq!(hep.c.dimension().exponents(), &[0.0, 1.0, 0.0]);
    assert_eq!(hep.hbar.dimension().exponents(), &[0.0, 0.0, 1.0]);

    let gev = hep.gev.to_underlying().unwrap();
    assert_relative_eq!(gev.value(), 1.602176634e-10, max_relative = 1e-9);
    assert_eq!(gev.dimension().exponents(), &[2.0, -2.0, 1.0]);
}

#[test]
fn test_electron_mass_in_hep() {
    // m_e = 9.1093837e-31 kg = 0.51099895e-3 GeV/c²
    let hep = build_hep_system().unwrap();
    let electron = hep.si.kg.scale(9.1093837015e-31).unwrap();
    let in_hep = electron.to_system(&hep.system).unwrap();

    assert_eq!(in_hep.dimension().exponents(), &[1.0, -2.0, 0.0]);
    assert_relative_eq!(in_hep.value(), 0.51099895e-3, max_relative = 1e-6);
}

#[test]
fn test_round_trip_si_hep_si() {
    let hep = build_hep_system().unwrap();
    let si = &hep.si;
    let samples = [
        si.m.scale(1.5e3).unwrap(),
        si.s.powf(-0.5).unwrap().scale(7.0).unwrap(),
        si.kg.multiply(&si.m).unwrap().scale(-2.25).unwrap(),
        si.m.powf(1.0 / 3.0).unwrap(),
    ];

    for q in &samples {
        let back = q.to_system(&hep.system).unwrap().to_system(&si.system).unwrap();
        assert_relative_eq!(back.value(), q.value(), max_relative = 1e-9);
        assert_eq!(back.dimension(), q.dimension());
    }
}

#[test]
fn test_conversion_to_own_system_is_identity() {
    let hep = build_hep_system().unwrap();
    let q = hep.gev.scale(91.1876).unwrap();
    assert_eq!(q.to_system(&hep.system).unwrap(), q);
}

#[test]
fn test_dependent_definitions_fail() {
    let ltm = ltm().unwrap();
    let def = |symbol: &str, value: f64, dim: [f64; 3]| {
        UnitDefinition::new(
            symbol.to_uppercase(),
            symbol,
            PhysicalQuantity::new(value, dim, &ltm).unwrap(),
        )
    };
    let result = MeasurementSystem::new(
        "Proportional",
        &ltm,
        vec![
            def("v", 299792458.0, [1.0, -1.0, 0.0]),
            def("w", 4.0, [-2.0, 2.0, 0.0]),
            def("kg", 1.0, [0.0, 0.0, 1.0]),
        ],
    );
    assert!(matches!(result, Err(UnitsError::SingularBasis { .. })));
}

#[test]
fn test_zero_valued_definition_fails_first() {
    let ltm = ltm().unwrap();
    let mut config = MeasurementSystemConfig::hep();
    config.definitions[0].value = 0.0;
    // Make the basis singular as well; the zero value must still be reported
    config.definitions[1].dimension = config.definitions[0].dimension.clone();
    assert_eq!(
        config.build(&ltm).unwrap_err(),
        UnitsError::ZeroValuedUnit {
            symbol: "GeV".to_string()
        }
    );
}

#[test]
fn test_config_and_factory_agree() {
    let hep = build_hep_system().unwrap();
    let from_config = MeasurementSystemConfig::hep().build(&hep.si.ltm).unwrap();

    let via_factory = hep.si.m.to_system(&hep.system).unwrap();
    let via_config = hep.si.m.to_system(&from_config).unwrap();
    assert_relative_eq!(via_factory.value(), via_config.value(), max_relative = 1e-12);
    assert_eq!(via_factory.dimension(), via_config.dimension());
}

#[test]
fn test_systems_over_different_ltm_instances_do_not_mix() {
    let a = build_hep_system().unwrap();
    let b = build_hep_system().unwrap();
    assert!(matches!(
        a.gev.to_system(&b.si.system),
        Err(UnitsError::IncompatibleUnderlyingSystem { .. })
    ));
    assert!(matches!(
        a.si.m.add(&b.si.m),
        Err(UnitsError::SystemMismatch { .. })
    ));
}

#[test]
fn test_one_unit_across_systems() {
    let hep = build_hep_system().unwrap();
    let si = &hep.si;
    let joule = si
        .kg
        .multiply(&si.m.powi(2).unwrap())
        .unwrap()
        .divide(&si.s.powi(2).unwrap())
        .unwrap()
        .scale(3.0)
        .unwrap();

    let one_gev = hep.system.one_unit(&AnyQuantity::from(joule.clone())).unwrap();
    assert_eq!(one_gev.value(), 1.0);
    assert_eq!(one_gev.dimension(), hep.gev.dimension());

    let one_joule = si.system.one_unit(&joule.into()).unwrap();
    assert_eq!(one_joule.value(), 1.0);
    assert_eq!(one_joule.dimension().exponents(), &[2.0, -2.0, 1.0]);
}

#[test]
fn test_batch_conversion_matches_single() {
    let hep = build_hep_system().unwrap();
    let batch: Vec<_> = (0..100)
        .map(|i| hep.gev.scale(f64::from(i) + 0.5).unwrap())
        .collect();
    let converted = MeasurementSystem::convert_all(&batch, &hep.si.system).unwrap();

    for (q, c) in batch.iter().zip(&converted) {
        let single = q.to_system(&hep.si.system).unwrap();
        assert_eq!(c, &single);
        assert!(Arc::ptr_eq(c.system(), &hep.si.system));
    }
}

#[test]
fn test_systems_are_shareable_across_threads() {
    let hep = build_hep_system().unwrap();
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let c = hep.c.clone();
            let si = Arc::clone(&hep.si.system);
            std::thread::spawn(move || -> units_core::Result<f64> {
                Ok(c.scale(f64::from(i))?.to_system(&si)?.value())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap().unwrap();
        assert_relative_eq!(value, (i + 1) as f64 * 299792458.0, max_relative = 1e-9);
    }
}

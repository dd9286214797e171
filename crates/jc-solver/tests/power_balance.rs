//! Direct and iterative power-balance resolution against the bundled air tables.

use jc_components::{Combustor, Compressor, Fuel, GasState, Turbine};
use jc_core::units::{MassRate, k, kgps, kpa, kw, ml_per_min};
use jc_props::TabulatedAir;
use jc_solver::{
    BisectionConfig, PowerBalanceMethod, PowerBalanceResolver, PowerDemand, ShaftLoad,
    SolverError,
};
use proptest::prelude::*;

struct Scenario {
    air: TabulatedAir,
    combustor_exit: GasState,
    demand: PowerDemand,
}

fn scenario(fuel_ml_per_min: f64, shaft_load: Option<ShaftLoad>) -> Scenario {
    let air = TabulatedAir::standard().unwrap();
    let ambient = GasState::from_temperature(&air, k(293.15), kpa(101.3), kgps(0.23)).unwrap();
    let compressor = Compressor::new(2.9, 0.675).unwrap().compress(&air, &ambient).unwrap();
    let combustor = Combustor::new(0.97, 0.925, Fuel::kerosene())
        .unwrap()
        .burn(&air, &compressor.actual, ml_per_min(fuel_ml_per_min))
        .unwrap();
    Scenario {
        demand: PowerDemand {
            compressor_work: compressor.actual_work,
            air_mass_flow: ambient.mass_flow(),
            shaft_load,
        },
        combustor_exit: combustor.state,
        air,
    }
}

fn resolver(method: PowerBalanceMethod) -> PowerBalanceResolver {
    PowerBalanceResolver::new(Turbine::new(0.725).unwrap(), method).unwrap()
}

fn air_flow() -> MassRate {
    kgps(0.23)
}

#[test]
fn direct_and_bisection_agree() {
    let s = scenario(390.0, None);
    let direct = resolver(PowerBalanceMethod::Direct)
        .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
        .unwrap();
    let iterative = resolver(PowerBalanceMethod::Bisection(BisectionConfig::default()))
        .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
        .unwrap();

    let rel = |a: f64, b: f64| (a - b).abs() / b.abs();
    assert!(rel(iterative.turbine.expansion_ratio, direct.turbine.expansion_ratio) < 1e-6);
    assert!(rel(iterative.turbine.actual_work, direct.turbine.actual_work) < 1e-6);
    assert!(
        (iterative.turbine.actual.temperature_k() - direct.turbine.actual.temperature_k()).abs()
            < 1e-3
    );
    assert!(iterative.iterations > 0 && iterative.iterations <= 200);
}

#[test]
fn balance_holds_on_air_basis() {
    let s = scenario(390.0, None);
    let balance = resolver(PowerBalanceMethod::Direct)
        .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
        .unwrap();
    let delivered = balance.delivered_work(air_flow());
    assert!((delivered - s.demand.compressor_work).abs() <= 1e-9 * s.demand.compressor_work);
}

#[test]
fn shaft_load_needs_more_expansion() {
    let unloaded = scenario(390.0, None);
    let loaded = scenario(390.0, Some(ShaftLoad::new(kw(2.0), 0.9).unwrap()));

    let r = resolver(PowerBalanceMethod::Direct);
    let a = r
        .resolve(&unloaded.air, &unloaded.combustor_exit, &unloaded.demand, kpa(101.3))
        .unwrap();
    let b = r
        .resolve(&loaded.air, &loaded.combustor_exit, &loaded.demand, kpa(101.3))
        .unwrap();

    assert!(b.turbine.expansion_ratio > a.turbine.expansion_ratio);
    let extra = b.required_work - a.required_work;
    assert!((extra - 2.0 / 0.9 / 0.23).abs() < 1e-9);
}

#[test]
fn starved_combustor_diverges_with_both_methods() {
    let s = scenario(100.0, None);
    for method in [
        PowerBalanceMethod::Direct,
        PowerBalanceMethod::Bisection(BisectionConfig::default()),
    ] {
        let err = resolver(method)
            .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
            .unwrap_err();
        assert!(
            matches!(err, SolverError::PowerBalanceDivergence { .. }),
            "{method:?}: {err}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn methods_agree_across_fuel_flows(fuel in 250.0f64..420.0) {
        let s = scenario(fuel, None);
        let direct = resolver(PowerBalanceMethod::Direct)
            .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
            .unwrap();
        let iterative = resolver(PowerBalanceMethod::Bisection(BisectionConfig::default()))
            .resolve(&s.air, &s.combustor_exit, &s.demand, kpa(101.3))
            .unwrap();
        prop_assert!(
            (iterative.turbine.actual_work - direct.turbine.actual_work).abs()
                < 1e-6 * direct.turbine.actual_work
        );
    }
}

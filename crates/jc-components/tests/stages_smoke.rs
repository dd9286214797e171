//! Integration tests chaining the stages with the bundled air tables.

use jc_components::{Combustor, Compressor, Fuel, GasState, Intake, Nozzle, Stage, Turbine};
use jc_core::units::{k, kgps, kpa, ml_per_min, mps};
use jc_props::TabulatedAir;

#[test]
fn reference_station_chain() {
    let air = TabulatedAir::standard().unwrap();
    let ambient = GasState::from_temperature(&air, k(293.15), kpa(101.3), kgps(0.23)).unwrap();

    let intake = Intake::new().pass(&ambient);
    let compressor = Compressor::new(2.9, 0.675).unwrap().compress(&air, &intake).unwrap();
    let combustor = Combustor::new(0.97, 0.925, Fuel::kerosene())
        .unwrap()
        .burn(&air, &compressor.actual, ml_per_min(390.0))
        .unwrap();

    // Power balance by hand: turbine work per kg of total flow.
    let air_flow = ambient.mass_flow().value;
    let total_flow = combustor.state.mass_flow().value;
    let turbine_work = compressor.actual_work * air_flow / total_flow;
    let turbine = Turbine::new(0.725)
        .unwrap()
        .expand_for_work(&air, &combustor.state, turbine_work)
        .unwrap();

    let nozzle = Nozzle::default()
        .expand(&air, &turbine.actual, kpa(101.3), mps(0.0))
        .unwrap();

    let temperatures = [
        intake.temperature_k(),
        compressor.actual.temperature_k(),
        combustor.state.temperature_k(),
        turbine.actual.temperature_k(),
        nozzle.actual.temperature_k(),
    ];
    assert!(temperatures[1] > temperatures[0]);
    assert!(temperatures[2] > temperatures[1]);
    assert!(temperatures[3] < temperatures[2]);
    assert!(temperatures[4] < temperatures[3]);

    // Exhaust a few hundred kelvin above ambient.
    assert!(temperatures[4] - 293.15 > 300.0 && temperatures[4] - 293.15 < 1200.0);

    assert!(turbine.expansion_ratio > 1.0);
    assert!(turbine.actual.pressure() > kpa(101.3));
    assert!(nozzle.exit_velocity.value.is_finite() && nozzle.exit_velocity.value > 0.0);
    assert!(nozzle.thrust.value > 80.0 && nozzle.thrust.value < 160.0);
}

#[test]
fn stage_names_and_efficiencies() {
    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(Intake::new()),
        Box::new(Compressor::new(2.9, 0.675).unwrap()),
        Box::new(Combustor::new(0.97, 0.925, Fuel::kerosene()).unwrap()),
        Box::new(Turbine::new(0.725).unwrap()),
        Box::new(Nozzle::default()),
    ];
    let names: Vec<_> = stages.iter().map(|s| s.name()).collect();
    assert_eq!(names, ["intake", "compressor", "combustor", "turbine", "nozzle"]);
    assert_eq!(stages[0].efficiency(), None);
    assert_eq!(stages[3].efficiency(), Some(0.725));
}

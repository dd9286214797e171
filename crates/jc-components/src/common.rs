//! Common utilities for stage calculations.

use crate::error::{ComponentError, ComponentResult};
use crate::state::GasState;
use jc_core::numeric::{ensure_efficiency, ensure_finite};
use jc_core::units::{MassRate, Pressure, SpecEnthalpy};
use jc_props::GasModel;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure an efficiency lies in (0, 1].
pub fn check_efficiency(value: f64, what: &'static str) -> ComponentResult<f64> {
    Ok(ensure_efficiency(value, what)?)
}

/// Build a stage exit state from its enthalpy.
///
/// An exit enthalpy above the top of the table means the stage added more
/// energy than any tabulated state holds; that is reported as an infeasible
/// operating point of `stage` rather than as a lookup failure.
pub fn exit_state(
    model: &dyn GasModel,
    enthalpy: SpecEnthalpy,
    pressure: Pressure,
    mass_flow: MassRate,
    stage: &'static str,
) -> ComponentResult<GasState> {
    GasState::from_enthalpy(model, enthalpy, pressure, mass_flow)
        .map_err(|err| above_table_is_infeasible(err, stage))
}

/// Build an isentropic exit state from its relative pressure.
pub fn ideal_exit_state(
    model: &dyn GasModel,
    relative_pressure: f64,
    pressure: Pressure,
    mass_flow: MassRate,
    stage: &'static str,
) -> ComponentResult<GasState> {
    GasState::from_relative_pressure(model, relative_pressure, pressure, mass_flow)
        .map_err(|err| above_table_is_infeasible(err, stage))
}

fn above_table_is_infeasible(err: ComponentError, stage: &'static str) -> ComponentError {
    match err {
        ComponentError::Property(props) if props.is_above_range() => ComponentError::Infeasible {
            stage,
            reason: format!("exit state beyond property table ({props})"),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_core::units::{kgps, kpa};
    use jc_props::TabulatedAir;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_efficiency() {
        assert_eq!(check_efficiency(0.725, "eta").unwrap(), 0.725);
        assert!(check_efficiency(-0.1, "eta").is_err());
    }

    #[test]
    fn exit_above_table_is_infeasible() {
        let air = TabulatedAir::standard().unwrap();
        let err = exit_state(&air, 9_000.0, kpa(300.0), kgps(0.23), "combustor").unwrap_err();
        assert!(matches!(err, ComponentError::Infeasible { stage: "combustor", .. }));
    }

    #[test]
    fn exit_below_table_stays_a_lookup_error() {
        let air = TabulatedAir::standard().unwrap();
        let err = exit_state(&air, 10.0, kpa(100.0), kgps(0.23), "turbine").unwrap_err();
        assert!(matches!(err, ComponentError::Property(_)));
    }

    #[test]
    fn ideal_exit_above_table_is_infeasible() {
        let air = TabulatedAir::standard().unwrap();
        let err = ideal_exit_state(&air, 1.0e6, kpa(300.0), kgps(0.23), "compressor").unwrap_err();
        assert!(matches!(err, ComponentError::Infeasible { stage: "compressor", .. }));
    }
}

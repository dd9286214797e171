//! Cycle evaluator: runs the stations in flow order.

use crate::error::{CycleError, CycleEvalResult};
use crate::inputs::CycleInputs;
use crate::result::{CycleResult, Station, StationState};
use crate::validation::ValidationMode;
use jc_components::{GasState, Intake};
use jc_config::TablesDef;
use jc_core::units::{to_kpa, to_ml_per_min};
use jc_props::{GasModel, PropsResult, TabulatedAir};
use jc_solver::{PowerBalanceResolver, PowerDemand};
use std::sync::Arc;
use tracing::{debug, warn};

/// Load the configured property tables, or the bundled dry-air tables.
pub fn load_gas_model(tables: Option<&TablesDef>) -> PropsResult<Arc<dyn GasModel>> {
    let model = match tables {
        Some(tables) => TabulatedAir::from_paths(&tables.gas_table, &tables.specific_heat_table)?,
        None => TabulatedAir::standard()?,
    };
    debug!(model = model.name(), "gas model loaded");
    Ok(Arc::new(model))
}

/// Evaluates cycles against one shared, read-only gas model.
///
/// `evaluate` takes `&self` and keeps no state between calls, so one
/// evaluator can serve any number of threads.
#[derive(Clone)]
pub struct CycleEvaluator {
    model: Arc<dyn GasModel>,
}

impl CycleEvaluator {
    pub fn new(model: Arc<dyn GasModel>) -> Self {
        Self { model }
    }

    /// Evaluator over the bundled standard air tables.
    pub fn standard() -> CycleEvalResult<Self> {
        Ok(Self::new(load_gas_model(None)?))
    }

    pub fn model(&self) -> &dyn GasModel {
        self.model.as_ref()
    }

    pub fn evaluate(&self, inputs: &CycleInputs) -> CycleEvalResult<CycleResult> {
        let model = self.model();
        let ambient_pressure = inputs.ambient_pressure;
        debug!(
            fuel_ml_per_min = to_ml_per_min(inputs.fuel_flow),
            t0 = inputs.ambient_temperature.value,
            p0_kpa = to_kpa(ambient_pressure),
            "evaluating cycle"
        );

        let ambient = GasState::from_temperature(
            model,
            inputs.ambient_temperature,
            ambient_pressure,
            inputs.air_mass_flow,
        )?;
        let intake = Intake::new().pass(&ambient);
        let compressor = inputs.compressor.compress(model, &intake)?;
        let combustor = inputs
            .combustor
            .burn(model, &compressor.actual, inputs.fuel_flow)?;

        let demand = PowerDemand {
            compressor_work: compressor.actual_work,
            air_mass_flow: inputs.air_mass_flow,
            shaft_load: inputs.shaft_load,
        };
        let balance = PowerBalanceResolver::new(inputs.turbine, inputs.power_balance)?.resolve(
            model,
            &combustor.state,
            &demand,
            ambient_pressure,
        )?;
        let turbine = balance.turbine;

        let nozzle = inputs.nozzle.expand(
            model,
            &turbine.actual,
            ambient_pressure,
            inputs.flight_velocity,
        )?;

        let total_mass_flow = combustor.state.mass_flow();
        let delivered_work = balance.delivered_work(inputs.air_mass_flow);
        let warnings = inputs.validation.check(
            nozzle.actual.temperature(),
            balance.required_work,
            delivered_work,
            inputs.power_balance.work_tolerance(),
        );

        if !warnings.is_empty() {
            for warning in &warnings {
                warn!("{warning}");
            }
            if inputs.validation.mode == ValidationMode::Reject {
                return Err(CycleError::Validation {
                    violations: warnings.iter().map(ToString::to_string).collect(),
                });
            }
        }

        let result = CycleResult {
            stations: [
                StationState {
                    station: Station::Intake,
                    ideal: None,
                    actual: intake,
                },
                StationState {
                    station: Station::Compressor,
                    ideal: Some(compressor.ideal),
                    actual: compressor.actual,
                },
                StationState {
                    station: Station::Combustor,
                    ideal: None,
                    actual: combustor.state,
                },
                StationState {
                    station: Station::Turbine,
                    ideal: Some(turbine.ideal),
                    actual: turbine.actual,
                },
                StationState {
                    station: Station::Nozzle,
                    ideal: Some(nozzle.ideal),
                    actual: nozzle.actual,
                },
            ],
            compressor_ideal_work: compressor.ideal_work,
            compressor_work: compressor.actual_work,
            turbine_ideal_work: turbine.ideal_work,
            turbine_work: turbine.actual_work,
            required_work: balance.required_work,
            turbine_expansion_ratio: turbine.expansion_ratio,
            air_mass_flow: inputs.air_mass_flow,
            fuel_mass_flow: combustor.fuel_mass_flow,
            total_mass_flow,
            fuel_air_ratio: combustor.fuel_air_ratio,
            heat_usable: combustor.heat_usable,
            exit_velocity: nozzle.exit_velocity,
            thrust: nozzle.thrust,
            power_balance_iterations: balance.iterations,
            warnings,
        };

        debug!(
            thrust_n = result.thrust.value,
            exit_velocity = result.exit_velocity.value,
            exhaust_k = result.exhaust_temperature().value,
            "cycle evaluated"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for CycleEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleEvaluator")
            .field("model", &self.model.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use jc_core::units::k;

    #[test]
    fn reference_cycle_is_positive_and_finite() {
        let evaluator = CycleEvaluator::standard().unwrap();
        let result = evaluator.evaluate(&CycleInputs::reference().unwrap()).unwrap();
        assert!(result.thrust.value.is_finite() && result.thrust.value > 0.0);
        assert!(result.exit_velocity.value.is_finite() && result.exit_velocity.value > 0.0);
        assert!(result.is_clean());
    }

    #[test]
    fn cold_ambient_outside_table() {
        let evaluator = CycleEvaluator::standard().unwrap();
        let inputs = CycleInputs {
            ambient_temperature: k(150.0),
            ..CycleInputs::reference().unwrap()
        };
        let err = evaluator.evaluate(&inputs).unwrap_err();
        assert_eq!(err.kind(), FailureKind::OutOfRangeInput);
    }

    #[test]
    fn missing_table_file_is_malformed_table() {
        let tables = TablesDef {
            gas_table: "/nonexistent/air.txt".into(),
            specific_heat_table: "/nonexistent/cp.txt".into(),
        };
        let Err(err) = load_gas_model(Some(&tables)) else {
            panic!("missing tables should not load");
        };
        assert_eq!(CycleError::from(err).kind(), FailureKind::MalformedTable);
    }
}

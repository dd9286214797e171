//! Typed runtime inputs of one cycle evaluation.

use crate::error::CycleEvalResult;
use crate::validation::ValidationPolicy;
use jc_components::{Combustor, Compressor, Fuel, Nozzle, NozzleModel, Turbine};
use jc_config::{CycleConfig, NozzleModelDef, PowerBalanceDef, validate_config};
use jc_core::units::{
    MassRate, Pressure, Temperature, Velocity, VolumeRate, k, kg_per_m3, kgps, kpa, kw,
    ml_per_min, mps,
};
use jc_solver::{BisectionConfig, PowerBalanceMethod, ShaftLoad};

/// Everything one evaluation needs besides the gas model.
///
/// Stage parameters are held as already-validated stage objects, so a
/// `CycleInputs` value can be cloned and varied (fuel flow, efficiencies)
/// without re-checking the untouched fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleInputs {
    pub ambient_temperature: Temperature,
    pub ambient_pressure: Pressure,
    pub flight_velocity: Velocity,
    pub air_mass_flow: MassRate,
    pub fuel_flow: VolumeRate,
    pub compressor: Compressor,
    pub combustor: Combustor,
    pub turbine: Turbine,
    pub nozzle: Nozzle,
    pub power_balance: PowerBalanceMethod,
    pub shaft_load: Option<ShaftLoad>,
    pub validation: ValidationPolicy,
}

impl CycleInputs {
    /// Validate a flat configuration and build the stage objects from it.
    pub fn from_config(config: &CycleConfig) -> CycleEvalResult<Self> {
        validate_config(config)?;

        let fuel = Fuel::new(
            kg_per_m3(config.fuel_density_kg_m3),
            config.fuel_lhv_kj_per_kg,
        )?;
        let nozzle_model = match config.nozzle {
            NozzleModelDef::Tabulated => NozzleModel::Tabulated,
            NozzleModelDef::SpecificHeat => NozzleModel::SpecificHeat,
        };
        let power_balance = match config.power_balance {
            PowerBalanceDef::Direct => PowerBalanceMethod::Direct,
            PowerBalanceDef::Bisection {
                max_iterations,
                rel_tol,
            } => PowerBalanceMethod::Bisection(BisectionConfig {
                max_iterations,
                rel_tol,
                ..BisectionConfig::default()
            }),
        };
        let shaft_load = config
            .shaft_load
            .map(|load| ShaftLoad::new(kw(load.power_kw), load.generator_efficiency))
            .transpose()?;

        Ok(Self {
            ambient_temperature: k(config.ambient_temperature_k),
            ambient_pressure: kpa(config.ambient_pressure_kpa),
            flight_velocity: mps(config.flight_velocity_mps),
            air_mass_flow: kgps(config.air_mass_flow_kgps),
            fuel_flow: ml_per_min(config.fuel_flow_ml_per_min),
            compressor: Compressor::new(
                config.compressor_pressure_ratio,
                config.compressor_efficiency,
            )?,
            combustor: Combustor::new(
                config.combustor_pressure_ratio,
                config.combustion_efficiency,
                fuel,
            )?,
            turbine: Turbine::new(config.turbine_efficiency)?,
            nozzle: Nozzle::new(config.nozzle_efficiency, nozzle_model)?,
            power_balance,
            shaft_load,
            validation: ValidationPolicy::from_config(
                config.exhaust_band.as_ref(),
                config.validation_mode,
            )?,
        })
    }

    /// The static test-stand reference point.
    pub fn reference() -> CycleEvalResult<Self> {
        Self::from_config(&CycleConfig::default())
    }

    pub fn with_fuel_flow(self, fuel_flow: VolumeRate) -> Self {
        Self { fuel_flow, ..self }
    }
}

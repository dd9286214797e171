//! Cycle configuration schema.
//!
//! A flat set of named scalars with units in the field names. Optional
//! sections are omitted from the serialized form when unset.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LATEST_VERSION: u32 = 1;

/// One cycle evaluation, as read from a YAML or JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleConfig {
    pub version: u32,

    pub ambient_temperature_k: f64,
    pub ambient_pressure_kpa: f64,
    #[serde(default)]
    pub flight_velocity_mps: f64,
    pub air_mass_flow_kgps: f64,

    pub fuel_flow_ml_per_min: f64,
    pub fuel_density_kg_m3: f64,
    pub fuel_lhv_kj_per_kg: f64,

    pub compressor_pressure_ratio: f64,
    pub combustor_pressure_ratio: f64,
    pub compressor_efficiency: f64,
    pub combustion_efficiency: f64,
    pub turbine_efficiency: f64,
    #[serde(default = "default_nozzle_efficiency")]
    pub nozzle_efficiency: f64,

    #[serde(default)]
    pub nozzle: NozzleModelDef,
    #[serde(default)]
    pub power_balance: PowerBalanceDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_load: Option<ShaftLoadDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaust_band: Option<ExhaustBandDef>,
    #[serde(default)]
    pub validation_mode: ValidationModeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<TablesDef>,
}

impl Default for CycleConfig {
    /// Small kerosene turbojet on a static test stand.
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            ambient_temperature_k: 293.15,
            ambient_pressure_kpa: 101.3,
            flight_velocity_mps: 0.0,
            air_mass_flow_kgps: 0.23,
            fuel_flow_ml_per_min: 390.0,
            fuel_density_kg_m3: 821.0,
            fuel_lhv_kj_per_kg: 43_000.0,
            compressor_pressure_ratio: 2.9,
            combustor_pressure_ratio: 0.97,
            compressor_efficiency: 0.675,
            combustion_efficiency: 0.925,
            turbine_efficiency: 0.725,
            nozzle_efficiency: default_nozzle_efficiency(),
            nozzle: NozzleModelDef::default(),
            power_balance: PowerBalanceDef::default(),
            shaft_load: None,
            exhaust_band: None,
            validation_mode: ValidationModeDef::default(),
            tables: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NozzleModelDef {
    #[default]
    Tabulated,
    SpecificHeat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PowerBalanceDef {
    #[default]
    Direct,
    Bisection {
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default = "default_rel_tol")]
        rel_tol: f64,
    },
}

/// Auxiliary load on the engine shaft, e.g. a generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShaftLoadDef {
    pub power_kw: f64,
    pub generator_efficiency: f64,
}

/// Admissible exhaust (nozzle exit) temperature band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExhaustBandDef {
    pub min_k: f64,
    pub max_k: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationModeDef {
    /// Record violations on the result and log them.
    #[default]
    Warn,
    /// Fail the evaluation.
    Reject,
}

/// Property table files replacing the bundled dry-air tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TablesDef {
    pub gas_table: PathBuf,
    pub specific_heat_table: PathBuf,
}

fn default_nozzle_efficiency() -> f64 {
    1.0
}

fn default_max_iterations() -> usize {
    200
}

fn default_rel_tol() -> f64 {
    1e-9
}

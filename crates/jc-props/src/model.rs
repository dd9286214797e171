//! Gas property model trait and the tabulated dry-air implementation.

use crate::error::PropsResult;
use crate::parse::{
    load_specific_heat_table, load_specific_heat_table_from_path, load_table,
    load_table_from_path,
};
use crate::specific_heat::{SpecificHeatOutput, SpecificHeatTable};
use crate::table::{GasProperty, PropertyTable};
use jc_core::units::SpecEnthalpy;
use std::path::Path;

const STANDARD_AIR_GAS_TABLE: &str = include_str!("../data/air_ideal_gas.txt");
const STANDARD_AIR_SPECIFIC_HEAT_TABLE: &str = include_str!("../data/air_specific_heat.txt");

/// Read-only property lookup consumed by the stage solvers.
///
/// Implementations must be thread-safe (Send + Sync): a single model is shared
/// by every concurrent cycle evaluation. Temperatures are in K, enthalpies in
/// kJ/kg, relative pressure dimensionless.
pub trait GasModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Interpolate column `to` where column `from` equals `value`.
    fn gas_property(&self, value: f64, from: GasProperty, to: GasProperty) -> PropsResult<f64>;

    /// Interpolate cp [kJ/(kg·K)] or γ at `temperature` [K].
    fn specific_heat(&self, temperature: f64, output: SpecificHeatOutput) -> PropsResult<f64>;

    /// Tabulated (min, max) of a gas property column.
    fn domain(&self, property: GasProperty) -> (f64, f64);

    fn enthalpy_at(&self, temperature: f64) -> PropsResult<SpecEnthalpy> {
        self.gas_property(temperature, GasProperty::Temperature, GasProperty::Enthalpy)
    }

    fn relative_pressure_at(&self, temperature: f64) -> PropsResult<f64> {
        self.gas_property(
            temperature,
            GasProperty::Temperature,
            GasProperty::RelativePressure,
        )
    }

    fn temperature_at_enthalpy(&self, enthalpy: SpecEnthalpy) -> PropsResult<f64> {
        self.gas_property(enthalpy, GasProperty::Enthalpy, GasProperty::Temperature)
    }

    fn relative_pressure_at_enthalpy(&self, enthalpy: SpecEnthalpy) -> PropsResult<f64> {
        self.gas_property(enthalpy, GasProperty::Enthalpy, GasProperty::RelativePressure)
    }

    fn enthalpy_at_relative_pressure(&self, relative_pressure: f64) -> PropsResult<SpecEnthalpy> {
        self.gas_property(
            relative_pressure,
            GasProperty::RelativePressure,
            GasProperty::Enthalpy,
        )
    }

    fn temperature_at_relative_pressure(&self, relative_pressure: f64) -> PropsResult<f64> {
        self.gas_property(
            relative_pressure,
            GasProperty::RelativePressure,
            GasProperty::Temperature,
        )
    }

    fn cp(&self, temperature: f64) -> PropsResult<f64> {
        self.specific_heat(temperature, SpecificHeatOutput::Cp)
    }

    fn gamma(&self, temperature: f64) -> PropsResult<f64> {
        self.specific_heat(temperature, SpecificHeatOutput::Gamma)
    }
}

/// Dry air described by a gas property table and a specific-heat table.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedAir {
    name: String,
    gas: PropertyTable,
    specific_heat: SpecificHeatTable,
}

impl TabulatedAir {
    pub fn new(name: impl Into<String>, gas: PropertyTable, specific_heat: SpecificHeatTable) -> Self {
        Self {
            name: name.into(),
            gas,
            specific_heat,
        }
    }

    /// Bundled dry-air tables (gas table 200–2200 K, specific heats 250–1500 K).
    pub fn standard() -> PropsResult<Self> {
        Ok(Self::new(
            "standard-air",
            load_table(STANDARD_AIR_GAS_TABLE)?,
            load_specific_heat_table(STANDARD_AIR_SPECIFIC_HEAT_TABLE)?,
        ))
    }

    /// Load both tables from disk.
    pub fn from_paths(gas_table: &Path, specific_heat_table: &Path) -> PropsResult<Self> {
        let gas = load_table_from_path(gas_table)?;
        let specific_heat = load_specific_heat_table_from_path(specific_heat_table)?;
        Ok(Self::new(gas_table.display().to_string(), gas, specific_heat))
    }

    pub fn gas_table(&self) -> &PropertyTable {
        &self.gas
    }

    pub fn specific_heat_table(&self) -> &SpecificHeatTable {
        &self.specific_heat
    }
}

impl GasModel for TabulatedAir {
    fn name(&self) -> &str {
        &self.name
    }

    fn gas_property(&self, value: f64, from: GasProperty, to: GasProperty) -> PropsResult<f64> {
        self.gas.interpolate(value, from, to)
    }

    fn specific_heat(&self, temperature: f64, output: SpecificHeatOutput) -> PropsResult<f64> {
        self.specific_heat.interpolate(temperature, output)
    }

    fn domain(&self, property: GasProperty) -> (f64, f64) {
        self.gas.domain(property)
    }
}

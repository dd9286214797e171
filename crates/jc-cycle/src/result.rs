//! Evaluated cycle: station states and derived performance.

use crate::validation::ValidationWarning;
use jc_components::GasState;
use jc_core::units::{Force, MassRate, Power, SpecWork, Temperature, Velocity};
use std::fmt;

/// Fixed stations of the flow path, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    /// Ambient air entering the engine.
    Intake,
    Compressor,
    Combustor,
    Turbine,
    /// Nozzle exit, fully expanded to ambient pressure.
    Nozzle,
}

impl Station {
    pub const ALL: [Station; 5] = [
        Station::Intake,
        Station::Compressor,
        Station::Combustor,
        Station::Turbine,
        Station::Nozzle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Station::Intake => "intake",
            Station::Compressor => "compressor",
            Station::Combustor => "combustor",
            Station::Turbine => "turbine",
            Station::Nozzle => "nozzle",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gas state at the exit of one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationState {
    pub station: Station,
    /// Isentropic exit, for stations with an efficiency correction.
    pub ideal: Option<GasState>,
    pub actual: GasState,
}

/// Outcome of one cycle evaluation.
///
/// Specific works are in kJ/kg: compressor work per kg of air, turbine work
/// per kg of the (air + fuel) flow through the turbine.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub stations: [StationState; 5],
    pub compressor_ideal_work: SpecWork,
    pub compressor_work: SpecWork,
    pub turbine_ideal_work: SpecWork,
    pub turbine_work: SpecWork,
    /// Compressor plus shaft-load demand [kJ/kg air].
    pub required_work: SpecWork,
    /// Turbine p_in / p_out.
    pub turbine_expansion_ratio: f64,
    pub air_mass_flow: MassRate,
    pub fuel_mass_flow: MassRate,
    pub total_mass_flow: MassRate,
    pub fuel_air_ratio: f64,
    pub heat_usable: Power,
    pub exit_velocity: Velocity,
    pub thrust: Force,
    /// Residual evaluations used by the power-balance resolver.
    pub power_balance_iterations: usize,
    pub warnings: Vec<ValidationWarning>,
}

impl CycleResult {
    pub fn station(&self, station: Station) -> &StationState {
        &self.stations[station.index()]
    }

    /// Actual exit state of `station`.
    pub fn state(&self, station: Station) -> &GasState {
        &self.station(station).actual
    }

    pub fn exhaust_temperature(&self) -> Temperature {
        self.state(Station::Nozzle).temperature()
    }

    /// Turbine work referred to the air flow [kJ/kg air].
    pub fn delivered_work(&self) -> SpecWork {
        self.turbine_work * self.total_mass_flow.value / self.air_mass_flow.value
    }

    /// `delivered_work - required_work`; zero for a balanced shaft.
    pub fn power_balance_residual(&self) -> SpecWork {
        self.delivered_work() - self.required_work
    }

    /// Thrust per unit air flow [N·s/kg].
    pub fn specific_thrust(&self) -> f64 {
        self.thrust.value / self.air_mass_flow.value
    }

    /// Fuel mass flow per unit thrust [kg/(N·s)]; infinite at zero thrust.
    pub fn thrust_specific_fuel_consumption(&self) -> f64 {
        self.fuel_mass_flow.value / self.thrust.value
    }

    /// Station temperatures [K] in flow order.
    pub fn temperature_profile(&self) -> [f64; 5] {
        self.stations.map(|s| s.actual.temperature_k())
    }

    /// Station pressures [kPa] in flow order.
    pub fn pressure_profile(&self) -> [f64; 5] {
        self.stations.map(|s| s.actual.pressure_kpa())
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
